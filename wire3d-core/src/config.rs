/// Render configuration.
///
/// Every value has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// fov_degrees = 75.0
/// camera_position = [0.0, 1.0, 4.0]
/// world_offset = [-0.5, -0.5, -0.5]
/// ```
///
/// The configuration is read once at startup and never changes while the
/// loop runs.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::camera::Camera;
use crate::errors::ConfigError;
use crate::projection::{Projection, Viewport};
use crate::transform::Mat4x4;
use crate::vector::{vec3, Vec3};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub near: f32,
    pub far: f32,
    pub fov_degrees: f32,
    pub camera_speed: f32,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    /// Translation applied to every triangle before the view transform.
    pub world_offset: [f32; 3],
    /// Grid size in cells. `None` means "use the whole terminal".
    pub screen_width: Option<u16>,
    pub screen_height: Option<u16>,
    /// Target frames per second; 0 renders as fast as possible.
    pub frame_rate: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 1000.0,
            fov_degrees: 90.0,
            camera_speed: 0.1,
            camera_position: [0.0, 0.0, 3.0],
            camera_target: [0.0, 0.0, 0.0],
            world_offset: [0.0, 0.0, 0.0],
            screen_width: None,
            screen_height: None,
            frame_rate: 30,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.into(),
            })
        }

        if !(self.near > 0.0) {
            return invalid("near", format!("must be positive, got {}", self.near));
        }
        if !(self.far > self.near) {
            return invalid("far", format!("must be greater than near ({}), got {}", self.near, self.far));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid(
                "fov_degrees",
                format!("must be between 0 and 180 degrees, got {}", self.fov_degrees),
            );
        }
        if !(self.camera_speed > 0.0) {
            return invalid("camera_speed", format!("must be positive, got {}", self.camera_speed));
        }
        if self.screen_width == Some(0) {
            return invalid("screen_width", "must be at least 1");
        }
        if self.screen_height == Some(0) {
            return invalid("screen_height", "must be at least 1");
        }
        Ok(())
    }

    /// Requested grid size, falling back to `available` per axis.
    pub fn viewport(&self, available: Viewport) -> Viewport {
        Viewport::new(
            self.screen_width.unwrap_or(available.width),
            self.screen_height.unwrap_or(available.height),
        )
    }

    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::for_viewport(self.near, self.far, self.fov_degrees, viewport)
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            to_vec3(self.camera_position),
            to_vec3(self.camera_target),
            self.camera_speed,
        )
    }

    /// World transform, or `None` when the offset is zero.
    pub fn world_transform(&self) -> Option<Mat4x4> {
        let [x, y, z] = self.world_offset;
        (self.world_offset != [0.0; 3]).then(|| Mat4x4::translation(x, y, z))
    }
}

fn to_vec3([x, y, z]: [f32; 3]) -> Vec3 {
    vec3(x, y, z)
}
