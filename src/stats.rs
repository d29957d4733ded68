//! Summary statistics over temperature samples.
//!
//! Every function returns `None` for an empty sequence; callers decide how to
//! report that case instead of receiving a NaN.

use serde::Serialize;

use crate::models::Temperature;

/// Arithmetic mean
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population variance (squared deviations divided by N, not N - 1)
pub fn variance(xs: &[f64]) -> Option<f64> {
    let mean = mean(xs)?;
    let squared_deviations: Vec<f64> = xs.iter().map(|x| (x - mean).powi(2)).collect();
    self::mean(&squared_deviations)
}

/// Population standard deviation
pub fn std_dev(xs: &[f64]) -> Option<f64> {
    variance(xs).map(f64::sqrt)
}

pub fn min(xs: &[f64]) -> Option<f64> {
    xs.iter().copied().reduce(f64::min)
}

pub fn max(xs: &[f64]) -> Option<f64> {
    xs.iter().copied().reduce(f64::max)
}

/// The five summary values reported for one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub min: Temperature,
    pub max: Temperature,
    pub mean: f64,
    #[serde(rename = "stddev")]
    pub std_dev: f64,
    pub variance: f64,
    /// Number of classified objects the statistics were computed from
    pub samples: usize,
}

impl TemperatureStats {
    /// Summarize a temperature sequence, `None` when it is empty
    pub fn from_temperatures(temperatures: &[Temperature]) -> Option<Self> {
        let min = *temperatures.iter().min()?;
        let max = *temperatures.iter().max()?;

        let values: Vec<f64> = temperatures.iter().map(|&t| f64::from(t)).collect();
        let mean = mean(&values)?;
        let variance = variance(&values)?;

        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            variance,
            samples: temperatures.len(),
        })
    }
}
