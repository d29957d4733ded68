//! Debug visualizations of the detection steps.

use std::collections::BTreeSet;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut};

use super::{BASE_TEMPERATURE, TEMPERATURE_STEP};
use crate::models::{ObjectPoint, PixelGrid, Temperature, unpack_rgba};

const BOUNDARY_LINE: Rgba<u8> = Rgba([0, 255, 255, 255]);
const OBJECT_MARK: Rgba<u8> = Rgba([255, 255, 0, 255]);

/// Input image with a vertical line through every boundary column
pub fn draw_boundaries(grid: &PixelGrid, boundaries: &BTreeSet<u32>) -> RgbaImage {
    let mut img = grid.to_rgba_image();
    let bottom = (grid.height() - 1) as f32;

    for &x in boundaries {
        draw_line_segment_mut(&mut img, (x as f32, 0.0), (x as f32, bottom), BOUNDARY_LINE);
    }

    img
}

/// Dimmed input image with every object pixel marked
pub fn highlight_objects(grid: &PixelGrid, objects: &[ObjectPoint]) -> RgbaImage {
    let mut img = dimmed(grid);

    // Isolated pixels are hard to spot, so small images get a cross instead
    let use_crosses = objects.len() < 64;
    for object in objects {
        if use_crosses {
            draw_cross_mut(&mut img, OBJECT_MARK, object.x as i32, object.y as i32);
        } else {
            img.put_pixel(object.x, object.y, OBJECT_MARK);
        }
    }

    img
}

/// Dimmed input image with objects colored from blue (coldest) to red (hottest zone)
pub fn tint_by_temperature(
    grid: &PixelGrid,
    objects: &[ObjectPoint],
    temperatures: &[Temperature],
    zones: usize,
) -> RgbaImage {
    let mut img = dimmed(grid);

    for (object, &temperature) in objects.iter().zip(temperatures) {
        img.put_pixel(object.x, object.y, band_color(temperature, zones));
    }

    img
}

fn band_color(temperature: Temperature, zones: usize) -> Rgba<u8> {
    let band = temperature.saturating_sub(BASE_TEMPERATURE) / TEMPERATURE_STEP;
    let ratio = if zones == 0 {
        0.0
    } else {
        (band as f32 / zones as f32).min(1.0)
    };
    let red = (ratio * 255.0).round() as u8;
    Rgba([red, 0, 255 - red, 255])
}

fn dimmed(grid: &PixelGrid) -> RgbaImage {
    RgbaImage::from_fn(grid.width(), grid.height(), |x, y| {
        let Rgba([r, g, b, _]) = grid.get(x, y).map(unpack_rgba).unwrap_or(Rgba([0, 0, 0, 255]));
        Rgba([r / 3, g / 3, b / 3, 255])
    })
}
