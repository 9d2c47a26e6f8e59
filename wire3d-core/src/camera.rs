/// Target-locked fly camera
use log::warn;

use crate::input::{KeyState, Movement};
use crate::transform::Mat4x4;
use crate::vector::{cross, normalize, vec3, world_up, Vec3};

/// Camera that always faces a fixed world-space target.
///
/// `forward`, `right` and `up` are derived from `pos` and `target` and are
/// rebuilt after every move, so moving sideways swings the camera around the
/// target instead of translating the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pos: Vec3,
    target: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    speed: f32,
}

impl Camera {
    pub fn new(pos: Vec3, target: Vec3, speed: f32) -> Self {
        let mut camera = Self {
            pos,
            target,
            forward: vec3(0.0, 0.0, -1.0),
            right: vec3(-1.0, 0.0, 0.0),
            up: world_up(),
            speed,
        };
        camera.reorient();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn move_forward(&mut self) {
        self.pos += self.forward * self.speed;
        self.reorient();
    }

    pub fn move_backward(&mut self) {
        self.pos -= self.forward * self.speed;
        self.reorient();
    }

    pub fn strafe_right(&mut self) {
        self.pos += self.side() * self.speed;
        self.reorient();
    }

    pub fn strafe_left(&mut self) {
        self.pos -= self.side() * self.speed;
        self.reorient();
    }

    pub fn apply(&mut self, movement: Movement) {
        match movement {
            Movement::Forward => self.move_forward(),
            Movement::Backward => self.move_backward(),
            Movement::StrafeLeft => self.strafe_left(),
            Movement::StrafeRight => self.strafe_right(),
        }
    }

    /// Apply one step for every movement key held. Returns whether the
    /// camera moved.
    pub fn apply_keys<K: KeyState + ?Sized>(&mut self, keys: &K) -> bool {
        let mut moved = false;
        for movement in Movement::ALL {
            if keys.is_key_down(movement.key()) {
                self.apply(movement);
                moved = true;
            }
        }
        moved
    }

    pub fn view_matrix(&self) -> Mat4x4 {
        Mat4x4::view(&self.pos, &self.forward, &self.up, &self.right)
    }

    /// Unit vector of `forward × up`, the strafe direction.
    fn side(&self) -> Vec3 {
        let mut side = cross(&self.forward, &self.up);
        normalize(&mut side);
        side
    }

    /// Rebuild the basis from `pos` and `target`. When the new basis would be
    /// degenerate the previous one is kept.
    fn reorient(&mut self) {
        let mut forward = self.target - self.pos;
        if !normalize(&mut forward) {
            warn!("camera position equals its target, keeping previous orientation");
            return;
        }

        let mut right = cross(&world_up(), &forward);
        if !normalize(&mut right) {
            warn!("camera is looking straight along the up axis, keeping previous orientation");
            return;
        }

        let mut up = cross(&forward, &right);
        normalize(&mut up);

        self.forward = forward;
        self.right = right;
        self.up = up;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(vec3(0.0, 0.0, 3.0), Vec3::zeros(), 0.1)
    }
}
