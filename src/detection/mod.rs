pub mod boundaries;
pub mod objects;
pub mod overlay;
pub mod steps;
pub mod temperature;

use crate::models::Color;

/// Top-row marker for a zone boundary: opaque (237, 28, 36)
pub const BOUNDARY_COLOR: Color = 3_978_044_671;

/// Marker for an object pixel: opaque black
pub const OBJECT_COLOR: Color = 255;

/// Temperature of an object with no boundary to its left
pub const BASE_TEMPERATURE: u32 = 6;

/// Temperature increase per boundary crossed
pub const TEMPERATURE_STEP: u32 = 2;

pub use boundaries::detect_boundaries;
pub use objects::detect_objects;
pub use temperature::{classify, temperature_for};

/// Build the standard analysis pipeline:
/// boundaries, objects, temperatures, statistics
pub fn build_standard_pipeline() -> crate::pipeline::Pipeline {
    use crate::detection::steps::*;
    use crate::pipeline::Pipeline;
    use std::sync::Arc;

    Pipeline::new()
        .add_step(Arc::new(BoundaryDetectionStep))
        .add_step(Arc::new(ObjectDetectionStep))
        .add_step(Arc::new(TemperatureStep))
        .add_step(Arc::new(StatisticsStep))
}
