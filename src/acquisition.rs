use std::path::Path;

use image::ImageReader;

use crate::error::AcquisitionError;
use crate::models::PixelGrid;

/// Decode an image file into a pixel grid of packed RGBA colors
pub fn load_grid(path: &Path) -> Result<PixelGrid, AcquisitionError> {
    let reader = ImageReader::open(path)
        .map_err(|source| AcquisitionError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| AcquisitionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let img = reader.decode().map_err(|source| AcquisitionError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    PixelGrid::from_rgba_image(&img.to_rgba8()).map_err(|source| AcquisitionError::MalformedGrid {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether the file extension belongs to a format the decoder understands
pub fn has_image_extension(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}
