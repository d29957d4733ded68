use std::collections::BTreeSet;

use super::{BASE_TEMPERATURE, TEMPERATURE_STEP};
use crate::models::{ObjectPoint, Temperature};

/// Temperature of an object in column `x`
///
/// Counts the boundaries strictly left of `x`; a boundary in the object's own
/// column does not count.
pub fn temperature_for(boundaries: &BTreeSet<u32>, x: u32) -> Temperature {
    let crossed = boundaries.range(..x).count() as u32;
    TEMPERATURE_STEP * crossed + BASE_TEMPERATURE
}

/// Assign a temperature to every object, preserving order
pub fn classify(boundaries: &BTreeSet<u32>, objects: &[ObjectPoint]) -> Vec<Temperature> {
    objects
        .iter()
        .map(|object| temperature_for(boundaries, object.x))
        .collect()
}
