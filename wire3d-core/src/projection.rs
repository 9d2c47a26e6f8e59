/// Projection parameters and the NDC to screen mapping
use nalgebra::Point2;

use crate::transform::Mat4x4;
use crate::vector::Vec3;

/// Size of the character grid being rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Height over width, the ratio the projection matrix scales x by.
    pub fn aspect_ratio(&self) -> f32 {
        f32::from(self.height) / f32::from(self.width)
    }

    /// Map normalized device coordinates to cell coordinates.
    ///
    /// `[-1, 1]` becomes `[0, 2]`, then is scaled by half the viewport size.
    /// Nothing is clamped; points outside the NDC cube land off-screen.
    pub fn to_screen(&self, ndc: &Vec3) -> Point2<f32> {
        Point2::new(
            (ndc.x + 1.0) * 0.5 * f32::from(self.width),
            (ndc.y + 1.0) * 0.5 * f32::from(self.height),
        )
    }
}

/// Fixed perspective parameters, turned into a fresh matrix every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub near: f32,
    pub far: f32,
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl Projection {
    pub fn new(near: f32, far: f32, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            near,
            far,
            fov_degrees,
            aspect,
        }
    }

    /// Projection whose aspect ratio matches `viewport`.
    pub fn for_viewport(near: f32, far: f32, fov_degrees: f32, viewport: Viewport) -> Self {
        Self::new(near, far, fov_degrees, viewport.aspect_ratio())
    }

    pub fn matrix(&self) -> Mat4x4 {
        Mat4x4::projection(self.near, self.far, self.fov_degrees, self.aspect)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(0.1, 1000.0, 90.0, 520.0 / 960.0)
    }
}
