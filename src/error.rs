use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while acquiring or processing a frame.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The frame has no pixels; the frame is skipped, the loop keeps going.
    #[error("invalid frame: {width}x{height} has zero area")]
    InvalidFrame { width: u32, height: u32 },

    /// Unrecoverable frame source failure.
    #[error("frame source error: {0}")]
    Source(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading the startup configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error in '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },
}
