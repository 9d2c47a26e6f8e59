/// wire3d Core Library - math, meshes and the wireframe pipeline
///
/// This library holds everything that does not touch a terminal: vector and
/// matrix math, the mesh model and file loader, the camera, the per-frame
/// projection pipeline, the line rasterizer and the frame loop. Front-ends
/// supply a display (`engine::Present`) and a keyboard (`input::Keyboard`).

pub mod camera;
pub mod config;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::Camera;
pub use config::RenderConfig;
pub use engine::{Engine, FrameProducer, Lifecycle, Present};
pub use errors::{ConfigError, EngineError, MeshError};
pub use frame::{Attr, Cell, Color, FrameBuffer};
pub use geometry::{Mesh, Triangle};
pub use input::{Key, KeyState, Keyboard, Movement, PressedKeys};
pub use obj::{load_obj, parse_obj, MeshLoad};
pub use pipeline::{render_mesh, FrameTransform};
pub use projection::{Projection, Viewport};
pub use transform::Mat4x4;
pub use vector::{vec3, Vec3};
