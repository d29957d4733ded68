use std::path::{Path, PathBuf};

use zonetherm::detection::{BOUNDARY_COLOR, OBJECT_COLOR};
use zonetherm::{Color, PixelGrid};

/// Opaque white, matches neither marker color
pub const BACKGROUND: Color = 0xFFFF_FFFF;

/// Builds a grid with boundary markers on the top row and object pixels at the given cells.
pub fn scene(width: u32, height: u32, boundaries: &[u32], objects: &[(u32, u32)]) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        if objects.contains(&(x, y)) {
            OBJECT_COLOR
        } else if y == 0 && boundaries.contains(&x) {
            BOUNDARY_COLOR
        } else {
            BACKGROUND
        }
    })
    .expect("Failed to build test grid")
}

/// The 10x1 grid with boundaries at columns 0 and 5 and one object at (7, 0).
pub fn single_object_scene() -> PixelGrid {
    scene(10, 1, &[0, 5], &[(7, 0)])
}

/// Objects at x=2 and x=8 with a single boundary at x=5.
pub fn two_object_scene() -> PixelGrid {
    scene(10, 3, &[5], &[(2, 1), (8, 2)])
}

/// A grid with boundaries but no object pixels.
pub fn empty_scene() -> PixelGrid {
    scene(8, 4, &[1, 3], &[])
}

/// Saves the grid as a PNG in `dir` and returns its path.
pub fn write_scene(dir: &Path, file_name: &str, grid: &PixelGrid) -> PathBuf {
    let path = dir.join(file_name);
    grid.to_rgba_image()
        .save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}
