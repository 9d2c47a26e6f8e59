/// Golden screen positions for a fixed scene.
///
/// Camera at (0, 0, 3) facing the origin, 90° field of view, near 0.1,
/// far 1000, on a 960x520 grid (aspect 520/960). The view matrix maps world
/// (x, y, z) to (-x, y, z - 3), so after projection
///   screen_x = (1 + (520/960) * x / (3 - z)) * 480
///   screen_y = (1 - y / (3 - z)) * 260

use nalgebra::Point2;
use wire3d_core::{
    render_mesh, vec3, Attr, Camera, Cell, FrameBuffer, FrameTransform, Mat4x4, Mesh,
    Projection, Triangle, Vec3, Viewport,
};

const EPS: f32 = 1e-3;

fn scene() -> (Camera, Projection, Viewport) {
    let viewport = Viewport::new(960, 520);
    let camera = Camera::new(vec3(0.0, 0.0, 3.0), Vec3::zeros(), 0.1);
    let projection = Projection::new(0.1, 1000.0, 90.0, 520.0 / 960.0);
    (camera, projection, viewport)
}

fn assert_point(actual: Point2<f32>, x: f32, y: f32) {
    assert!(
        (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
        "expected ({x}, {y}), got ({}, {})",
        actual.x,
        actual.y
    );
}

#[test]
fn golden_triangle_at_origin() {
    let (camera, projection, viewport) = scene();
    let transform = FrameTransform::new(&camera, &projection, viewport);

    let tri = Triangle::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
    let [a, b, c] = transform.project_triangle(&tri);

    assert_point(a, 480.0, 260.0);
    assert_point(b, 480.0 + 480.0 * (520.0 / 960.0) / 3.0, 260.0);
    assert_point(c, 480.0, 260.0 - 260.0 / 3.0);
    assert_point(b, 566.6667, 260.0);
    assert_point(c, 480.0, 173.3333);
}

#[test]
fn golden_triangle_with_world_offset() {
    let (camera, projection, viewport) = scene();
    let transform = FrameTransform::new(&camera, &projection, viewport)
        .with_world(Mat4x4::translation(0.0, 0.0, -1.0));

    // Pushed back to z = -1, so the divisor becomes 4
    let tri = Triangle::new(vec3(0.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0));
    let [a, b, c] = transform.project_triangle(&tri);

    assert_point(a, 480.0, 260.0);
    assert_point(b, 480.0 + 480.0 * (520.0 / 960.0) * 2.0 / 4.0, 260.0);
    assert_point(c, 480.0, 260.0 - 260.0 * 2.0 / 4.0);
}

#[test]
fn golden_triangle_is_rasterized() {
    let (camera, projection, viewport) = scene();
    let transform = FrameTransform::new(&camera, &projection, viewport);

    let mut mesh = Mesh::new();
    mesh.add_triangle(Triangle::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)));

    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let cell = Cell::new('#', Attr::default());
    assert_eq!(render_mesh(&mesh, &transform, &mut fb, cell), 1);

    // Vertices truncate to (480, 260), (566, 260), (480, 173)
    for (x, y) in [(480, 260), (566, 260), (480, 173), (523, 260), (480, 200)] {
        assert_eq!(fb.get(x, y), Some(cell), "cell ({x}, {y})");
    }
    assert_eq!(fb.get(500, 240), Some(Cell::blank()));
}

#[test]
fn moving_forward_enlarges_projection() {
    let (mut camera, projection, viewport) = scene();
    let tri = Triangle::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));

    let before = FrameTransform::new(&camera, &projection, viewport).project_triangle(&tri);
    for _ in 0..10 {
        camera.move_forward();
    }
    let after = FrameTransform::new(&camera, &projection, viewport).project_triangle(&tri);

    // Camera now at z = 2, divisor 2 instead of 3
    assert_point(after[1], 480.0 + 480.0 * (520.0 / 960.0) / 2.0, 260.0);
    assert!(after[1].x - after[0].x > before[1].x - before[0].x);
}
