use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use image::DynamicImage;

use crate::detection::{FrameStages, TargetPipeline};
use crate::error::VisionError;
use crate::source::FrameSource;
use crate::telemetry::TargetPublisher;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Save the input and intermediate images of frame `index`.
    fn save_frame(&self, index: u64, input: &DynamicImage, stages: &FrameStages) -> Result<()> {
        let filename = format!("{:06}.png", index);
        let output_path = |step_dir_name: &str| -> Result<PathBuf> {
            let step_dir = self.output_dir.join(step_dir_name);
            std::fs::create_dir_all(&step_dir)?;
            Ok(step_dir.join(&filename))
        };

        let save_err = |e: image::ImageError| anyhow::anyhow!("Failed to save debug image: {}", e);
        input.save(output_path("00_input")?).map_err(save_err)?;
        stages.resized.save(output_path("01_resize")?).map_err(save_err)?;
        stages.mask.save(output_path("02_hsv_threshold")?).map_err(save_err)?;
        tracing::trace!("saved debug images for frame {}", index);

        Ok(())
    }
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames taken from the source.
    pub frames: u64,
    /// Frames dropped because they could not be processed.
    pub skipped: u64,
    /// Results written to telemetry.
    pub published: u64,
}

/// Fetches frames, runs the target pipeline and publishes, one frame at a time.
pub struct VisionRunner<S: FrameSource> {
    source: S,
    pipeline: TargetPipeline,
    publisher: TargetPublisher,
    debug: Option<DebugConfig>,
    max_frames: Option<u64>,
}

impl<S: FrameSource> VisionRunner<S> {
    pub fn new(source: S, pipeline: TargetPipeline, publisher: TargetPublisher) -> Self {
        Self {
            source,
            pipeline,
            publisher,
            debug: None,
            max_frames: None,
        }
    }

    /// Stop after this many frames.
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Run until the source ends, `max_frames` is reached, or `shutdown`
    /// is raised. The flag is only checked between frames.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<RunStats> {
        let mut stats = RunStats::default();

        loop {
            if shutdown.load(Ordering::Acquire) {
                tracing::info!("vision loop stopping on request");
                break;
            }
            if self.max_frames.is_some_and(|max| stats.frames >= max) {
                break;
            }

            let Some(frame) = self.source.next_frame()? else {
                tracing::info!("frame source exhausted");
                break;
            };
            let index = stats.frames;
            stats.frames += 1;

            let stages = match self.pipeline.process_stages(&frame) {
                Ok(stages) => stages,
                Err(e @ VisionError::InvalidFrame { .. }) => {
                    tracing::warn!("skipping frame {}: {}", index, e);
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            self.publisher.publish(&stages.result);
            stats.published += 1;

            let saved = match &self.debug {
                Some(debug) => debug.save_frame(index, &frame, &stages),
                None => Ok(()),
            };
            if let Err(e) = saved {
                tracing::warn!("disabling debug output after frame {}: {:#}", index, e);
                self.debug = None;
            }
        }

        Ok(stats)
    }
}

const FINISH_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A [`VisionRunner`] running on its own thread.
pub struct VisionThread {
    shutdown: Arc<AtomicBool>,
    handle: JoinHandle<Result<RunStats>>,
}

impl VisionThread {
    pub fn spawn<S>(mut runner: VisionRunner<S>) -> Result<Self>
    where
        S: FrameSource + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();
        let handle = thread::Builder::new()
            .name("vision".to_string())
            .spawn(move || runner.run(&flag))?;

        Ok(Self { shutdown, handle })
    }

    /// Ask the loop to stop before it fetches the next frame.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the loop to end on its own, or for `signal` to complete,
    /// in which case the loop is stopped first. Returns the joined stats.
    pub async fn run_until<F: Future>(self, signal: F) -> Result<RunStats> {
        tokio::select! {
            _ = signal => {
                tracing::info!("stopping vision thread");
                self.stop();
            }
            _ = self.finished() => {}
        }
        self.join()
    }

    async fn finished(&self) {
        while !self.is_finished() {
            tokio::time::sleep(FINISH_POLL_INTERVAL).await;
        }
    }

    pub fn join(self) -> Result<RunStats> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("vision thread panicked"))?
    }
}
