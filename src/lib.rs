pub mod acquisition;
pub mod batch;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use error::{AcquisitionError, GridError};
pub use models::{Color, ImageOutcome, ImageResult, ObjectPoint, PixelGrid, Temperature};
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineData, PipelineStep};
pub use stats::TemperatureStats;
