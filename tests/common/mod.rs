mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from zonetherm for tests
pub use zonetherm::detection::{BOUNDARY_COLOR, OBJECT_COLOR};
pub use zonetherm::{Color, GridError, ImageOutcome, ImageResult, ObjectPoint, PixelGrid, TemperatureStats};
