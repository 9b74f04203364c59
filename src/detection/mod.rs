pub mod contours;
pub mod filter;
pub mod geometry;
pub mod preprocessing;
pub mod segmentation;
pub mod target;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::VisionError;
use crate::models::{Contour, TargetResult};
use filter::FilterCriteria;
use segmentation::HsvThreshold;

/// Tuning constants for the vision pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Working resolution every stage after resizing runs at.
    pub width: u32,
    pub height: u32,
    pub threshold: HsvThreshold,
    pub filter: FilterCriteria,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            threshold: HsvThreshold::default(),
            filter: FilterCriteria::default(),
        }
    }
}

/// Intermediate outputs of one pipeline invocation.
pub struct FrameStages {
    pub resized: RgbImage,
    pub mask: GrayImage,
    pub contours: Vec<Contour>,
    pub filtered: Vec<Contour>,
    pub result: TargetResult,
}

/// Stateless per-frame target detector.
#[derive(Debug, Clone, Default)]
pub struct TargetPipeline {
    pub config: PipelineConfig,
}

impl TargetPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every stage on one frame.
    pub fn process(&self, frame: &DynamicImage) -> Result<TargetResult, VisionError> {
        Ok(self.process_stages(frame)?.result)
    }

    /// Run every stage on one frame and keep the intermediate outputs.
    pub fn process_stages(&self, frame: &DynamicImage) -> Result<FrameStages, VisionError> {
        let PipelineConfig {
            width,
            height,
            threshold,
            filter: criteria,
        } = self.config;

        let resized = preprocessing::resize_frame(frame, width, height)?;
        let mask = segmentation::hsv_threshold(&resized, &threshold);
        let contours = contours::find_all_contours(&mask);
        let filtered = filter::filter_contours(&contours, &criteria);
        let result = target::select_target(&filtered, width, height);

        tracing::debug!(
            "{} contours, {} passed filter, center=({:.1}, {:.1}) offset=({:.1}, {:.1})",
            contours.len(),
            filtered.len(),
            result.center.x,
            result.center.y,
            result.offset.x,
            result.offset.y
        );

        Ok(FrameStages {
            resized,
            mask,
            contours,
            filtered,
            result,
        })
    }

    /// Threshold mask of a frame (for debugging)
    pub fn get_mask(&self, frame: &DynamicImage) -> Result<GrayImage, VisionError> {
        let resized = preprocessing::resize_frame(frame, self.config.width, self.config.height)?;
        Ok(segmentation::hsv_threshold(&resized, &self.config.threshold))
    }

    /// All contours in a frame, before filtering (for debugging)
    pub fn get_contours(&self, frame: &DynamicImage) -> Result<Vec<Contour>, VisionError> {
        Ok(contours::find_all_contours(&self.get_mask(frame)?))
    }
}
