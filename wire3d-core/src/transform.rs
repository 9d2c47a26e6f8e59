/// 4×4 homogeneous matrices for the wireframe pipeline
///
/// Entries are addressed as `m[c][r]`: column first, then row. The backing
/// nalgebra matrix is column-major as well, so `m[c][r]` is `matrix[(r, c)]`
/// and `A * B` is the plain nalgebra product, i.e.
/// `R[c][r] = Σ_k A[k][r] * B[c][k]`.
use nalgebra::{Matrix4, Vector4};
use std::ops::Mul;

use crate::vector::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4x4 {
    m: Matrix4<f32>,
}

impl Mat4x4 {
    /// All-zero matrix. This is also what `Default` gives you, not identity.
    pub fn zeroed() -> Self {
        Self {
            m: Matrix4::zeros(),
        }
    }

    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    /// Entry `m[c][r]`.
    #[inline]
    pub fn get(&self, c: usize, r: usize) -> f32 {
        self.m[(r, c)]
    }

    /// Set entry `m[c][r]`.
    #[inline]
    pub fn set(&mut self, c: usize, r: usize, value: f32) {
        self.m[(r, c)] = value;
    }

    /// Perspective projection.
    ///
    /// `fov_degrees` is the full field of view in degrees; `aspect` is the
    /// height / width ratio of the target surface. Maps view-space depth into
    /// `w`, so `transform_vector` performs the perspective divide.
    pub fn projection(near: f32, far: f32, fov_degrees: f32, aspect: f32) -> Self {
        let tan_half_fov = (fov_degrees.to_radians() / 2.0).tan();
        let mut out = Self::zeroed();
        out.set(0, 0, aspect / tan_half_fov);
        out.set(1, 1, 1.0 / tan_half_fov);
        out.set(2, 2, far / (far - near));
        out.set(3, 2, (-near * far) / (far - near));
        out.set(2, 3, 1.0);
        out
    }

    /// Identity with the translation column set to `(x, y, z)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::identity();
        out.set(3, 0, x);
        out.set(3, 1, y);
        out.set(3, 2, z);
        out
    }

    /// Camera view matrix: the basis rotation composed with a translation by
    /// `-pos`.
    pub fn view(pos: &Vec3, forward: &Vec3, up: &Vec3, right: &Vec3) -> Self {
        let mut rotation = Self::zeroed();
        for r in 0..3 {
            rotation.set(0, r, right[r]);
            rotation.set(1, r, up[r]);
            rotation.set(2, r, -forward[r]);
        }
        rotation.set(3, 3, 1.0);

        let translation = Self::translation(-pos.x, -pos.y, -pos.z);
        rotation * translation
    }

    /// Apply the matrix to `(v, 1)` and divide by the resulting `w`.
    ///
    /// When `w` comes out as exactly zero the undivided coordinates are
    /// returned as-is.
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        let h = self.m * Vector4::new(v.x, v.y, v.z, 1.0);
        let out = h.xyz();
        if h.w != 0.0 {
            out / h.w
        } else {
            out
        }
    }
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Mul for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Mat4x4 {
        Mat4x4 { m: self.m * rhs.m }
    }
}

impl Mul for &Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: &Mat4x4) -> Mat4x4 {
        Mat4x4 { m: self.m * rhs.m }
    }
}
