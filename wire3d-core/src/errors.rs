/// Error types for the wire3d core.
///
/// Only conditions a caller can act on are errors. Malformed mesh lines,
/// off-screen pixels and zero perspective divisors are handled where they
/// occur and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a mesh file.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The file could not be opened or read.
    #[error("failed to read mesh file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to load or validate a render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed fine but is outside its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Failure inside the frame loop.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to present frame: {0}")]
    Present(#[from] std::io::Error),

    #[error("failed to spawn render thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("render thread panicked")]
    RenderThreadPanicked,
}
