mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from pivision for tests
pub use pivision::{
    Contour, FilterCriteria, PipelineConfig, PointF, TargetPipeline, TargetResult, VisionError,
};
