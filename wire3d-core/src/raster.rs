/// Line and triangle rasterization
///
/// Lines use a DDA walk: the longer axis advances one cell per step and the
/// shorter axis by a fractional increment accumulated in `f32`, with
/// positions truncated toward zero. Writes outside the surface are dropped by
/// the surface itself.
use crate::frame::Cell;

/// Lines with more steps than this start their walk at the first step that
/// can reach the surface instead of at the first endpoint.
const SKIP_THRESHOLD: i64 = 1 << 16;

/// Something cells can be drawn into.
pub trait Surface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    /// Write one cell; out-of-range coordinates must be ignored.
    fn draw(&mut self, x: i32, y: i32, cell: Cell);
}

/// Draw a line from `(x1, y1)` to `(x2, y2)`, both ends included.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    cell: Cell,
) {
    let dx = i64::from(x2) - i64::from(x1);
    let dy = i64::from(y2) - i64::from(y1);
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        surface.draw(x1, y1, cell);
        return;
    }

    let x_inc = dx as f32 / steps as f32;
    let y_inc = dy as f32 / steps as f32;
    let (width, height) = (f32::from(surface.width()), f32::from(surface.height()));

    let mut i = 0;
    let mut x = x1 as f32;
    let mut y = y1 as f32;

    // Projected edges can run far off-screen. Jump straight to the part of a
    // very long line that can land on the surface.
    if steps > SKIP_THRESHOLD {
        let (x0, y0) = (f64::from(x1), f64::from(y1));
        let Some(x_first) = first_visible_step(x0, f64::from(x_inc), surface.width(), steps) else {
            return;
        };
        let Some(y_first) = first_visible_step(y0, f64::from(y_inc), surface.height(), steps) else {
            return;
        };
        i = x_first.max(y_first);
        x = (x0 + i as f64 * f64::from(x_inc)) as f32;
        y = (y0 + i as f64 * f64::from(y_inc)) as f32;
    }

    while i <= steps {
        if leaving(x, x_inc, width) || leaving(y, y_inc, height) {
            break;
        }
        surface.draw(x as i32, y as i32, cell);
        x += x_inc;
        y += y_inc;
        i += 1;
    }
}

/// Outline of a triangle: edges 0→1, 1→2, 2→0.
pub fn draw_triangle<S: Surface + ?Sized>(surface: &mut S, points: [(i32, i32); 3], cell: Cell) {
    let [(x1, y1), (x2, y2), (x3, y3)] = points;
    draw_line(surface, x1, y1, x2, y2, cell);
    draw_line(surface, x2, y2, x3, y3, cell);
    draw_line(surface, x3, y3, x1, y1, cell);
}

/// Fill the inclusive rectangle `(x1, y1)..=(x2, y2)`.
pub fn fill<S: Surface + ?Sized>(surface: &mut S, x1: i32, y1: i32, x2: i32, y2: i32, cell: Cell) {
    let x_end = x2.min(i32::from(surface.width()) - 1);
    let y_end = y2.min(i32::from(surface.height()) - 1);
    for x in x1.max(0)..=x_end {
        for y in y1.max(0)..=y_end {
            surface.draw(x, y, cell);
        }
    }
}

/// True once `pos` is off the `0..extent` cell range and still moving away
/// from it, so no later step can be drawn.
#[inline]
fn leaving(pos: f32, inc: f32, extent: f32) -> bool {
    (pos <= -1.0 && inc <= 0.0) || (pos >= extent && inc >= 0.0)
}

/// First step index in `0..=steps` for which `origin + i * inc` can truncate
/// into `0..extent`, one step early. `None` if the line never gets there.
fn first_visible_step(origin: f64, inc: f64, extent: u16, steps: i64) -> Option<i64> {
    // Truncation maps (-1, extent) onto 0..extent
    let (lo, hi) = (-1.0, f64::from(extent));
    if inc == 0.0 {
        return (origin > lo && origin < hi).then_some(0);
    }

    let (a, b) = ((lo - origin) / inc, (hi - origin) / inc);
    let (start, end) = if a < b { (a, b) } else { (b, a) };
    let first = (start.floor() as i64).saturating_sub(1).max(0);
    let last = (end.ceil() as i64).saturating_add(1).min(steps);
    (first <= last).then_some(first)
}
