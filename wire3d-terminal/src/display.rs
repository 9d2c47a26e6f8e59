/// Crossterm presenter for character frame buffers
use anyhow::{bail, Context, Result};
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use log::{debug, info};
use std::io::{self, stdout, Stdout, Write};
use wire3d_core::{Attr, Color, FrameBuffer, Present, RenderConfig, Viewport};

/// Owns the terminal while rendering: raw mode, alternate screen, hidden
/// cursor. Everything is restored by `exit` or on drop.
pub struct TerminalDisplay {
    stdout: Stdout,
    buf: Vec<u8>,
    viewport: Viewport,
    active: bool,
}

impl TerminalDisplay {
    /// Take over the terminal. The configured screen size must fit in it;
    /// unset dimensions use the full terminal.
    pub fn enter(config: &RenderConfig) -> Result<Self> {
        let (columns, rows) = terminal::size().context("failed to query terminal size")?;
        let available = Viewport::new(columns, rows);
        let viewport = fit_viewport(config.viewport(available), available)?;

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut display = Self {
            stdout: stdout(),
            buf: Vec::with_capacity(64 * 1024),
            viewport,
            active: true,
        };
        display.buf.queue(terminal::EnterAlternateScreen)?;
        display.buf.queue(cursor::Hide)?;
        display.buf.queue(terminal::DisableLineWrap)?;
        display.flush_buf().context("failed to prepare terminal")?;

        info!(
            "terminal display {}x{} (terminal is {}x{})",
            viewport.width, viewport.height, columns, rows
        );
        Ok(display)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl Present for TerminalDisplay {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.buf.clear();
        encode_frame_into(frame, &mut self.buf)?;
        self.flush_buf()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn fit_viewport(viewport: Viewport, available: Viewport) -> Result<Viewport> {
    if viewport.width == 0 || viewport.height == 0 {
        bail!("screen size {}x{} is empty", viewport.width, viewport.height);
    }
    if viewport.width > available.width || viewport.height > available.height {
        bail!(
            "screen size {}x{} is too large for a {}x{} terminal",
            viewport.width,
            viewport.height,
            available.width,
            available.height
        );
    }
    Ok(viewport)
}

/// Encode a full redraw of `frame` into `out`, switching colours only where
/// the attribute changes.
pub fn encode_frame_into<W: Write>(frame: &FrameBuffer, out: &mut W) -> io::Result<()> {
    let mut current: Option<Attr> = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in frame.row(y).unwrap_or_default() {
            if current != Some(cell.attr) {
                out.queue(SetForegroundColor(to_crossterm(cell.attr.fg)))?;
                out.queue(SetBackgroundColor(to_crossterm(cell.attr.bg)))?;
                current = Some(cell.attr);
            }
            out.queue(Print(cell.glyph))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::DarkRed => style::Color::DarkRed,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::Grey => style::Color::Grey,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Blue => style::Color::Blue,
        Color::Green => style::Color::Green,
        Color::Cyan => style::Color::Cyan,
        Color::Red => style::Color::Red,
        Color::Magenta => style::Color::Magenta,
        Color::Yellow => style::Color::Yellow,
        Color::White => style::Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::Cell;

    #[test]
    fn test_fit_viewport() {
        let available = Viewport::new(80, 24);
        assert_eq!(fit_viewport(available, available).unwrap(), available);
        assert_eq!(
            fit_viewport(Viewport::new(40, 20), available).unwrap(),
            Viewport::new(40, 20)
        );
        assert!(fit_viewport(Viewport::new(960, 520), available).is_err());
        assert!(fit_viewport(Viewport::new(0, 24), Viewport::new(0, 24)).is_err());
    }

    #[test]
    fn test_encode_contains_glyphs() {
        let mut frame = FrameBuffer::new(3, 2);
        frame.draw(1, 0, Cell::new('#', Attr::new(Color::White, Color::Black)));
        frame.draw(2, 1, Cell::new('@', Attr::new(Color::Cyan, Color::Black)));

        let mut out = Vec::new();
        encode_frame_into(&frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let hash = text.find('#').unwrap();
        let at = text.find('@').unwrap();
        assert!(hash < at);
    }

    #[test]
    fn test_encode_switches_colour_only_on_change() {
        let frame = FrameBuffer::new(8, 1);
        let mut uniform = Vec::new();
        encode_frame_into(&frame, &mut uniform).unwrap();

        let mut striped_frame = FrameBuffer::new(8, 1);
        for x in (0..8).step_by(2) {
            striped_frame.draw(x, 0, Cell::new(' ', Attr::new(Color::Red, Color::Blue)));
        }
        let mut striped = Vec::new();
        encode_frame_into(&striped_frame, &mut striped).unwrap();

        assert!(striped.len() > uniform.len());
    }
}
