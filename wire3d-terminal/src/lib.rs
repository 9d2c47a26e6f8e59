/// Terminal front-end for the wire3d wireframe renderer
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;
use wire3d_core::frame::GLYPH_SOLID;
use wire3d_core::{
    render_mesh, Attr, Camera, Cell, Color, Engine, FrameBuffer, FrameProducer, FrameTransform,
    Key, Keyboard, Lifecycle, Mat4x4, Mesh, Projection, RenderConfig, Viewport,
};

pub mod display;
pub mod keys;

pub use display::TerminalDisplay;
pub use keys::TerminalKeys;

const STATUS_ATTR: Attr = Attr::new(Color::Yellow, Color::Black);

/// Frame producer flying a camera around a single mesh.
pub struct WireframeApp<K> {
    mesh: Mesh,
    camera: Camera,
    projection: Projection,
    world: Option<Mat4x4>,
    keys: K,
    lifecycle: Lifecycle,
    pen: Cell,
    last_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl<K: Keyboard> WireframeApp<K> {
    pub fn new(
        mesh: Mesh,
        config: &RenderConfig,
        viewport: Viewport,
        keys: K,
        lifecycle: Lifecycle,
    ) -> Self {
        Self {
            mesh,
            camera: config.camera(),
            projection: config.projection(viewport),
            world: config.world_transform(),
            keys,
            lifecycle,
            pen: Cell::new(GLYPH_SOLID, Attr::new(Color::White, Color::Black)),
            last_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.last_sample.elapsed();
        if elapsed.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_sample = Instant::now();
        }
    }

    fn draw_status(&self, frame: &mut FrameBuffer) {
        let pos = self.camera.position();
        let status = format!(
            "wire3d | {} triangles | FPS: {:.1} | pos ({:.2}, {:.2}, {:.2}) | WASD/Arrows=Move Q=Quit",
            self.mesh.len(),
            self.fps,
            pos.x,
            pos.y,
            pos.z
        );
        frame.put_str(0, 0, &status, STATUS_ATTR);
    }
}

impl<K: Keyboard> FrameProducer for WireframeApp<K> {
    fn produce_frame(&mut self, frame: &mut FrameBuffer) {
        let (width, height) = (i32::from(frame.width()), i32::from(frame.height()));
        frame.fill(0, 0, width - 1, height - 1, Cell::blank());

        self.keys.poll();
        if self.keys.is_key_down(Key::Quit) {
            info!("quit requested");
            self.lifecycle.stop();
        }
        self.camera.apply_keys(&self.keys);

        let viewport = Viewport::new(frame.width(), frame.height());
        let mut transform = FrameTransform::new(&self.camera, &self.projection, viewport);
        if let Some(world) = self.world {
            transform = transform.with_world(world);
        }
        render_mesh(&self.mesh, &transform, frame, self.pen);

        self.update_fps();
        self.draw_status(frame);
    }
}

/// Render `mesh` in the terminal until the user quits.
pub fn run(mesh: Mesh, config: &RenderConfig) -> Result<()> {
    let display = TerminalDisplay::enter(config)?;
    let viewport = display.viewport();
    let lifecycle = Lifecycle::new();
    let keys = TerminalKeys::new();

    info!("rendering {} triangles", mesh.len());
    let app = WireframeApp::new(mesh, config, viewport, keys, lifecycle.clone());
    let engine = Engine::new(app, display, viewport, lifecycle)
        .with_frame_rate(config.frame_rate)
        .start()
        .context("render loop failed")?;

    // Drop the keyboard first so its terminal mode is popped on the
    // alternate screen.
    let (app, mut display) = engine.into_parts();
    drop(app);
    display.exit().context("failed to restore terminal")?;
    Ok(())
}
