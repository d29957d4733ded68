mod common;

use std::collections::BTreeSet;

use zonetherm::detection::{classify, detect_boundaries, detect_objects, temperature_for};

use common::*;

fn point(x: u32, y: u32) -> ObjectPoint {
    ObjectPoint { x, y }
}

#[test]
fn test_boundaries_come_from_top_row_only() {
    // Boundary-colored pixels below the top row are not markers
    let grid = PixelGrid::from_fn(6, 3, |x, y| match (x, y) {
        (1, 0) | (4, 0) => BOUNDARY_COLOR,
        (2, 1) | (3, 2) => BOUNDARY_COLOR,
        _ => BACKGROUND,
    })
    .unwrap();

    assert_eq!(detect_boundaries(&grid), BTreeSet::from([1, 4]));
}

#[test]
fn test_no_boundaries() {
    let grid = scene(5, 5, &[], &[(2, 2)]);
    assert!(detect_boundaries(&grid).is_empty());
}

#[test]
fn test_objects_are_scanned_column_by_column() {
    let grid = scene(4, 5, &[], &[(2, 0), (0, 3), (0, 1), (3, 4), (2, 2)]);

    assert_eq!(
        detect_objects(&grid),
        vec![point(0, 1), point(0, 3), point(2, 0), point(2, 2), point(3, 4)]
    );
}

#[test]
fn test_markers_do_not_overlap() {
    let grid = scene(6, 2, &[0, 3], &[]);
    assert!(detect_objects(&grid).is_empty());

    let grid = scene(6, 2, &[], &[(0, 0), (3, 0)]);
    assert!(detect_boundaries(&grid).is_empty());
}

#[test]
fn test_zero_boundaries_give_base_temperature() {
    let grid = scene(7, 4, &[], &[(0, 0), (3, 1), (6, 3), (6, 2)]);
    let temperatures = classify(&detect_boundaries(&grid), &detect_objects(&grid));

    assert_eq!(temperatures, vec![6, 6, 6, 6]);
}

#[test]
fn test_boundary_in_object_column_is_not_crossed() {
    let boundaries = BTreeSet::from([2, 5, 9]);

    assert_eq!(temperature_for(&boundaries, 0), 6);
    assert_eq!(temperature_for(&boundaries, 2), 6);
    assert_eq!(temperature_for(&boundaries, 3), 8);
    assert_eq!(temperature_for(&boundaries, 5), 8);
    assert_eq!(temperature_for(&boundaries, 6), 10);
    assert_eq!(temperature_for(&boundaries, 100), 12);
}

#[test]
fn test_classify_preserves_length_and_order() {
    let boundaries = BTreeSet::from([1, 4]);
    let objects = vec![point(5, 0), point(0, 0), point(2, 7), point(5, 1), point(4, 3)];

    let temperatures = classify(&boundaries, &objects);

    assert_eq!(temperatures.len(), objects.len());
    assert_eq!(temperatures, vec![10, 6, 8, 10, 8]);
}

#[test]
fn test_single_object_scene() {
    let grid = single_object_scene();
    let boundaries = detect_boundaries(&grid);
    let objects = detect_objects(&grid);

    assert_eq!(boundaries, BTreeSet::from([0, 5]));
    assert_eq!(objects, vec![point(7, 0)]);
    assert_eq!(classify(&boundaries, &objects), vec![10]);
}

#[test]
fn test_grid_construction_errors() {
    assert_eq!(
        PixelGrid::from_columns(vec![vec![BACKGROUND; 3], vec![BACKGROUND; 2]]),
        Err(GridError::Ragged {
            column: 1,
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        PixelGrid::from_columns(vec![]),
        Err(GridError::Empty {
            width: 0,
            height: 0
        })
    );
    assert_eq!(
        PixelGrid::from_fn(4, 0, |_, _| BACKGROUND),
        Err(GridError::Empty {
            width: 4,
            height: 0
        })
    );
}

#[test]
fn test_grid_addressing() {
    let grid = PixelGrid::from_columns(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();

    assert_eq!((grid.width(), grid.height()), (2, 3));
    assert_eq!(grid.get(1, 0), Some(4));
    assert_eq!(grid.get(0, 2), Some(3));
    assert_eq!(grid.get(2, 0), None);
    assert_eq!(grid.column(1), &[4, 5, 6]);
}
