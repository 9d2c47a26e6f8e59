/// Geometry primitives for wireframe rendering
use crate::transform::Mat4x4;
use crate::vector::{cross, normalized, vec3, Vec3};

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p: [Vec3; 3],
    /// Cached face normal. Only valid right after `compute_normal`; editing
    /// `p` does not refresh it.
    pub normal: Option<Vec3>,
}

impl Triangle {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self {
            p: [p0, p1, p2],
            normal: None,
        }
    }

    /// Recompute the cached unit normal from the current vertex positions.
    ///
    /// Degenerate triangles (collinear vertices) have no normal.
    pub fn compute_normal(&mut self) -> Option<Vec3> {
        let line1 = self.p[1] - self.p[0];
        let line2 = self.p[2] - self.p[0];
        self.normal = normalized(&cross(&line1, &line2));
        self.normal
    }

    /// Copy of this triangle with every vertex passed through `m`.
    pub fn transformed(&self, m: &Mat4x4) -> Triangle {
        Triangle::new(
            m.transform_vector(&self.p[0]),
            m.transform_vector(&self.p[1]),
            m.transform_vector(&self.p[2]),
        )
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned cube with corner `(x, y, z)` and edge length `s`.
    ///
    /// Always 12 triangles, faces in the order south, east, north, west,
    /// top, bottom; two triangles per face sharing the face's first vertex.
    pub fn cube(x: f32, y: f32, z: f32, s: f32) -> Self {
        let mut mesh = Self::with_capacity(12);
        let mut face = |a: Vec3, b: Vec3, c: Vec3, d: Vec3| {
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        };

        // South
        face(
            vec3(x, y, z),
            vec3(x, y + s, z),
            vec3(x + s, y + s, z),
            vec3(x + s, y, z),
        );
        // East
        face(
            vec3(x + s, y, z),
            vec3(x + s, y + s, z),
            vec3(x + s, y + s, z + s),
            vec3(x + s, y, z + s),
        );
        // North
        face(
            vec3(x + s, y, z + s),
            vec3(x + s, y + s, z + s),
            vec3(x, y + s, z + s),
            vec3(x, y, z + s),
        );
        // West
        face(
            vec3(x, y, z),
            vec3(x, y + s, z),
            vec3(x, y + s, z + s),
            vec3(x, y, z + s),
        );
        // Top
        face(
            vec3(x, y + s, z),
            vec3(x, y + s, z + s),
            vec3(x + s, y + s, z + s),
            vec3(x + s, y + s, z),
        );
        // Bottom
        face(
            vec3(x, y, z),
            vec3(x + s, y, z),
            vec3(x + s, y, z + s),
            vec3(x, y, z + s),
        );

        mesh
    }
}
