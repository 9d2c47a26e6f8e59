/// Per-frame world → view → projection → screen transform
use nalgebra::Point2;

use crate::camera::Camera;
use crate::frame::Cell;
use crate::geometry::{Mesh, Triangle};
use crate::projection::{Projection, Viewport};
use crate::raster::{self, Surface};
use crate::transform::Mat4x4;

/// Matrices for one frame. Build a new one every frame from the current
/// camera; nothing here is meant to outlive the frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransform {
    world: Option<Mat4x4>,
    view: Mat4x4,
    projection: Mat4x4,
    viewport: Viewport,
}

impl FrameTransform {
    pub fn new(camera: &Camera, projection: &Projection, viewport: Viewport) -> Self {
        Self::from_matrices(camera.view_matrix(), projection.matrix(), viewport)
    }

    pub fn from_matrices(view: Mat4x4, projection: Mat4x4, viewport: Viewport) -> Self {
        Self {
            world: None,
            view,
            projection,
            viewport,
        }
    }

    /// Apply `world` to every vertex before the view transform.
    pub fn with_world(mut self, world: Mat4x4) -> Self {
        self.world = Some(world);
        self
    }

    /// Screen position of each vertex of `triangle`.
    ///
    /// Vertices behind the camera still produce coordinates (the divide by a
    /// negative or tiny `w` is not guarded); nothing is culled or clipped.
    pub fn project_triangle(&self, triangle: &Triangle) -> [Point2<f32>; 3] {
        triangle.p.map(|vertex| {
            let world = match &self.world {
                Some(world) => world.transform_vector(&vertex),
                None => vertex,
            };
            let viewed = self.view.transform_vector(&world);
            let projected = self.projection.transform_vector(&viewed);
            self.viewport.to_screen(&projected)
        })
    }

    /// Projected triangles of `mesh`, in mesh order.
    pub fn project_mesh<'a>(
        &'a self,
        mesh: &'a Mesh,
    ) -> impl Iterator<Item = [Point2<f32>; 3]> + 'a {
        mesh.triangles.iter().map(move |t| self.project_triangle(t))
    }
}

/// Draw the wireframe of every triangle of `mesh` into `surface`.
/// Returns the number of triangles submitted.
pub fn render_mesh<S: Surface + ?Sized>(
    mesh: &Mesh,
    transform: &FrameTransform,
    surface: &mut S,
    cell: Cell,
) -> usize {
    let mut submitted = 0;
    for points in transform.project_mesh(mesh) {
        raster::draw_triangle(surface, points.map(|p| (p.x as i32, p.y as i32)), cell);
        submitted += 1;
    }
    submitted
}
