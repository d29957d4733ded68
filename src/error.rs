use std::path::PathBuf;
use thiserror::Error;

/// Structural problems with a pixel grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has a zero dimension ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("column {column} has {found} rows, expected {expected}")]
    Ragged {
        column: u32,
        expected: u32,
        found: usize,
    },

    #[error("grid dimension {0} does not fit in 32 bits")]
    TooLarge(usize),
}

/// Failure to turn a stored image into a pixel grid
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to open image {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed pixel grid in {}", path.display())]
    MalformedGrid {
        path: PathBuf,
        #[source]
        source: GridError,
    },
}
