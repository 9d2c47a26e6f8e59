/// 3D vector helpers
///
/// `Vec3` is nalgebra's `Vector3<f32>`, so `+`, `-`, unary `-`, `* k`, `/ k`,
/// `dot` and `norm` come straight from nalgebra. This module adds the pieces
/// with renderer-specific rules: the world up axis, the cross product order
/// used by the camera, and normalisation that refuses zero-length input.
use nalgebra::Vector3;

pub type Vec3 = Vector3<f32>;

#[inline]
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// World-space up axis used to seed the camera basis.
#[inline]
pub fn world_up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// `a × b` with the argument order kept exactly as given.
#[inline]
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Normalize `v` in place.
///
/// A zero-length vector is left untouched and `false` is returned.
pub fn normalize(v: &mut Vec3) -> bool {
    v.try_normalize_mut(0.0).is_some()
}

/// Unit-length copy of `v`, or `None` when `v` has zero length.
pub fn normalized(v: &Vec3) -> Option<Vec3> {
    let mut out = *v;
    normalize(&mut out).then_some(out)
}
