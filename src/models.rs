use image::{Rgba, RgbaImage};
use serde::Serialize;

use crate::error::GridError;
use crate::stats::TemperatureStats;

/// Packed 32-bit RGBA color (`r << 24 | g << 16 | b << 8 | a`)
pub type Color = u32;

/// Temperature assigned to a detected object
pub type Temperature = u32;

pub fn pack_rgba(pixel: Rgba<u8>) -> Color {
    u32::from_be_bytes(pixel.0)
}

pub fn unpack_rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_be_bytes())
}

/// Immutable width x height grid of packed colors, origin at the top-left
///
/// Pixels are stored column by column so that a whole column is a contiguous
/// slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, GridError>
    where
        F: FnMut(u32, u32) -> Color,
    {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for x in 0..width {
            for y in 0..height {
                pixels.push(f(x, y));
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from a list of columns (`columns[x][y]`)
    pub fn from_columns(columns: Vec<Vec<Color>>) -> Result<Self, GridError> {
        let width = u32::try_from(columns.len()).map_err(|_| GridError::TooLarge(columns.len()))?;
        let first_len = columns.first().map(Vec::len).unwrap_or(0);
        let height = u32::try_from(first_len).map_err(|_| GridError::TooLarge(first_len))?;

        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for (x, column) in columns.into_iter().enumerate() {
            if column.len() != first_len {
                return Err(GridError::Ragged {
                    column: x as u32,
                    expected: height,
                    found: column.len(),
                });
            }
            pixels.extend(column);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from a decoded RGBA image
    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self, GridError> {
        Self::from_fn(img.width(), img.height(), |x, y| pack_rgba(*img.get_pixel(x, y)))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at (x, y), or `None` outside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[x as usize * self.height as usize + y as usize])
    }

    /// All rows of column `x`, top to bottom
    pub fn column(&self, x: u32) -> &[Color] {
        if x >= self.width {
            return &[];
        }
        let start = x as usize * self.height as usize;
        &self.pixels[start..start + self.height as usize]
    }

    /// Columns left to right
    pub fn columns(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.height as usize)
    }

    /// Render the grid back into an image (used for debug output)
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (x, column) in self.columns().enumerate() {
            for (y, &color) in column.iter().enumerate() {
                img.put_pixel(x as u32, y as u32, unpack_rgba(color));
            }
        }
        img
    }
}

/// Coordinates of a pixel painted with the object color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectPoint {
    pub x: u32,
    pub y: u32,
}

/// Per-image analysis result handed to the reporting layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: ImageOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageOutcome {
    /// At least one object was found and classified
    #[serde(rename = "ok")]
    Measured(TemperatureStats),
    /// The image contained no object pixels, so there is nothing to measure
    NoObjects,
    /// The image could not be acquired or the pipeline failed on it
    Failed { reason: String },
}

impl ImageResult {
    pub fn measured(name: impl Into<String>, stats: TemperatureStats) -> Self {
        Self {
            name: name.into(),
            outcome: ImageOutcome::Measured(stats),
        }
    }

    pub fn no_objects(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: ImageOutcome::NoObjects,
        }
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: ImageOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn stats(&self) -> Option<&TemperatureStats> {
        match &self.outcome {
            ImageOutcome::Measured(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ImageOutcome::Failed { .. })
    }
}
