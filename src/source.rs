use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};

use crate::error::VisionError;

/// Blocking supplier of frames for the vision loop.
pub trait FrameSource: Send {
    /// Block until the next frame is available.
    ///
    /// `Ok(None)` means the source has no more frames.
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, VisionError>;
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Reads still images from a directory in file name order.
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    next: usize,
    looping: bool,
}

impl ImageSequenceSource {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, VisionError> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_image {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(VisionError::Source(format!(
                "no images found in {}",
                dir.display()
            )));
        }

        Ok(Self {
            files,
            next: 0,
            looping: false,
        })
    }

    /// Restart from the first file instead of ending.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, VisionError> {
        if self.next >= self.files.len() {
            if !self.looping {
                return Ok(None);
            }
            self.next = 0;
        }

        let path = &self.files[self.next];
        self.next += 1;
        let img = ImageReader::open(path)?.decode()?;
        Ok(Some(img))
    }
}

/// Yields a fixed list of frames, then ends.
#[derive(Default)]
pub struct MemorySource {
    frames: VecDeque<DynamicImage>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = DynamicImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, VisionError> {
        Ok(self.frames.pop_front())
    }
}
