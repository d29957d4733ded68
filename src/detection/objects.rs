use super::OBJECT_COLOR;
use crate::models::{ObjectPoint, PixelGrid};

/// Find every object pixel, column by column (all rows of x before x + 1)
pub fn detect_objects(grid: &PixelGrid) -> Vec<ObjectPoint> {
    let mut objects = Vec::new();

    for (x, column) in grid.columns().enumerate() {
        for (y, &color) in column.iter().enumerate() {
            if color == OBJECT_COLOR {
                objects.push(ObjectPoint {
                    x: x as u32,
                    y: y as u32,
                });
            }
        }
    }

    objects
}
