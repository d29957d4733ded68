use std::collections::BTreeSet;

use super::BOUNDARY_COLOR;
use crate::models::PixelGrid;

/// Find the columns marked as zone boundaries
///
/// Only the top row is inspected; boundary markers anywhere else are ignored.
pub fn detect_boundaries(grid: &PixelGrid) -> BTreeSet<u32> {
    (0..grid.width())
        .filter(|&x| grid.get(x, 0) == Some(BOUNDARY_COLOR))
        .collect()
}
