pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod routing;
pub mod source;
pub mod telemetry;

pub use config::Config;
pub use detection::filter::FilterCriteria;
pub use detection::segmentation::{ChannelRange, HsvThreshold};
pub use detection::{PipelineConfig, TargetPipeline};
pub use error::{ConfigError, VisionError};
pub use models::{BoundingRect, Contour, PointF, TargetResult};
pub use pipeline::{DebugConfig, RunStats, VisionRunner, VisionThread};
pub use routing::CameraRouter;
pub use source::{FrameSource, ImageSequenceSource, MemorySource};
pub use telemetry::{TargetPublisher, TelemetryStore, TelemetryTable, Value};
