/// Frame loop.
///
/// The loop owns one [`FrameBuffer`] and repeats: ask the [`FrameProducer`]
/// to fill it, hand it to the [`Present`] collaborator, pace to the target
/// frame rate. It stops when its [`Lifecycle`] is stopped; the flag is only
/// checked between frames, so shutdown can lag by up to one frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::errors::EngineError;
use crate::frame::FrameBuffer;
use crate::projection::Viewport;

/// Application side of the loop: draws one frame into the buffer.
pub trait FrameProducer {
    fn produce_frame(&mut self, frame: &mut FrameBuffer);
}

/// Display side of the loop: shows a finished frame.
pub trait Present {
    fn present(&mut self, frame: &FrameBuffer) -> std::io::Result<()>;
}

/// Shared running flag for one loop. Clones observe and control the same
/// loop.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    running: Arc<AtomicBool>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Engine<P, D> {
    producer: P,
    display: D,
    frame: FrameBuffer,
    lifecycle: Lifecycle,
    frame_interval: Option<Duration>,
    frames: u64,
}

impl<P: FrameProducer, D: Present> Engine<P, D> {
    pub fn new(producer: P, display: D, viewport: Viewport, lifecycle: Lifecycle) -> Self {
        Self {
            producer,
            display,
            frame: FrameBuffer::new(viewport.width, viewport.height),
            lifecycle,
            frame_interval: None,
            frames: 0,
        }
    }

    /// Sleep away the rest of each frame to hold `fps`. Zero disables pacing.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_interval = (fps > 0).then(|| Duration::from_secs(1) / fps);
        self
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_parts(self) -> (P, D) {
        (self.producer, self.display)
    }

    /// Run the loop on the calling thread until the lifecycle is stopped or
    /// presenting fails.
    pub fn run(&mut self) -> Result<u64, EngineError> {
        debug!(
            "frame loop starting ({}x{})",
            self.frame.width(),
            self.frame.height()
        );
        let started = self.frames;

        while self.lifecycle.is_running() {
            let frame_start = Instant::now();

            self.producer.produce_frame(&mut self.frame);
            self.display.present(&self.frame)?;
            self.frames += 1;

            if let Some(interval) = self.frame_interval {
                let elapsed = frame_start.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        }

        let produced = self.frames - started;
        debug!("frame loop stopped after {produced} frames");
        Ok(produced)
    }
}

impl<P, D> Engine<P, D>
where
    P: FrameProducer + Send + 'static,
    D: Present + Send + 'static,
{
    /// Run the loop on a dedicated render thread and wait for it to finish.
    pub fn start(mut self) -> Result<Self, EngineError> {
        info!("starting render thread");
        let handle = thread::Builder::new()
            .name("wire3d-render".into())
            .spawn(move || {
                let result = self.run();
                (self, result)
            })
            .map_err(EngineError::Spawn)?;

        let (engine, result) = handle
            .join()
            .map_err(|_| EngineError::RenderThreadPanicked)?;
        result?;
        info!("render thread finished after {} frames", engine.frames);
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Attr, Cell, GLYPH_SOLID};
    use std::io;

    struct CountingProducer {
        lifecycle: Lifecycle,
        remaining: u32,
    }

    impl FrameProducer for CountingProducer {
        fn produce_frame(&mut self, frame: &mut FrameBuffer) {
            frame.clear();
            frame.draw(0, 0, Cell::new(GLYPH_SOLID, Attr::default()));
            self.remaining -= 1;
            if self.remaining == 0 {
                self.lifecycle.stop();
            }
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        presented: Vec<Cell>,
    }

    impl Present for RecordingDisplay {
        fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
            self.presented.push(frame.cells()[0]);
            Ok(())
        }
    }

    struct BrokenDisplay;

    impl Present for BrokenDisplay {
        fn present(&mut self, _frame: &FrameBuffer) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_lifecycle_clones_share_state() {
        let lifecycle = Lifecycle::new();
        let other = lifecycle.clone();
        assert!(other.is_running());
        lifecycle.stop();
        assert!(!other.is_running());
    }

    #[test]
    fn test_run_until_stopped() {
        let lifecycle = Lifecycle::new();
        let producer = CountingProducer {
            lifecycle: lifecycle.clone(),
            remaining: 3,
        };
        let mut engine = Engine::new(producer, RecordingDisplay::default(), Viewport::new(4, 2), lifecycle);

        assert_eq!(engine.run().unwrap(), 3);
        assert_eq!(engine.frames(), 3);
        let (_, display) = engine.into_parts();
        assert_eq!(display.presented.len(), 3);
        assert_eq!(display.presented[0].glyph, GLYPH_SOLID);
    }

    #[test]
    fn test_stopped_lifecycle_produces_nothing() {
        let lifecycle = Lifecycle::new();
        lifecycle.stop();
        let producer = CountingProducer {
            lifecycle: lifecycle.clone(),
            remaining: 1,
        };
        let mut engine = Engine::new(producer, RecordingDisplay::default(), Viewport::new(4, 2), lifecycle);
        assert_eq!(engine.run().unwrap(), 0);
    }

    #[test]
    fn test_present_failure_ends_loop() {
        let lifecycle = Lifecycle::new();
        let producer = CountingProducer {
            lifecycle: lifecycle.clone(),
            remaining: 10,
        };
        let mut engine = Engine::new(producer, BrokenDisplay, Viewport::new(4, 2), lifecycle);
        assert!(matches!(engine.run(), Err(EngineError::Present(_))));
        assert_eq!(engine.frames(), 0);
    }

    #[test]
    fn test_start_on_render_thread() {
        let lifecycle = Lifecycle::new();
        let producer = CountingProducer {
            lifecycle: lifecycle.clone(),
            remaining: 5,
        };
        let engine = Engine::new(producer, RecordingDisplay::default(), Viewport::new(4, 2), lifecycle)
            .with_frame_rate(1000)
            .start()
            .unwrap();
        assert_eq!(engine.frames(), 5);
        assert!(!engine.lifecycle().is_running());
    }
}
