use crate::detection::{boundaries, objects, overlay, temperature};
use crate::pipeline::{PipelineContext, PipelineData, PipelineStep};
use crate::stats::TemperatureStats;
use anyhow::Result;
use image::RgbaImage;
use tracing::debug;

/// Find zone boundary columns on the top row
pub struct BoundaryDetectionStep;

impl PipelineStep for BoundaryDetectionStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let found = boundaries::detect_boundaries(&data.grid);
        debug!(image = %data.name, boundaries = ?found, "detected boundaries");
        data.boundaries = Some(found);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Boundary Detection"
    }

    fn visualize(&self, data: &PipelineData) -> Option<RgbaImage> {
        let boundaries = data.boundaries.as_ref()?;
        Some(overlay::draw_boundaries(&data.grid, boundaries))
    }
}

/// Find every object pixel
pub struct ObjectDetectionStep;

impl PipelineStep for ObjectDetectionStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let found = objects::detect_objects(&data.grid);
        debug!(image = %data.name, objects = found.len(), "detected objects");
        data.objects = Some(found);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Object Detection"
    }

    fn visualize(&self, data: &PipelineData) -> Option<RgbaImage> {
        let objects = data.objects.as_deref()?;
        Some(overlay::highlight_objects(&data.grid, objects))
    }
}

/// Assign each object a temperature from the boundaries on its left
pub struct TemperatureStep;

impl PipelineStep for TemperatureStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let temperatures = temperature::classify(data.boundaries()?, data.objects()?);
        data.temperatures = Some(temperatures);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Temperature Classification"
    }

    fn visualize(&self, data: &PipelineData) -> Option<RgbaImage> {
        let objects = data.objects.as_deref()?;
        let temperatures = data.temperatures.as_deref()?;
        let zones = data.boundaries.as_ref().map_or(0, |b| b.len());
        Some(overlay::tint_by_temperature(
            &data.grid,
            objects,
            temperatures,
            zones,
        ))
    }
}

/// Summarize the temperatures; leaves `stats` empty when there are none
pub struct StatisticsStep;

impl PipelineStep for StatisticsStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let stats = TemperatureStats::from_temperatures(data.temperatures()?);
        match &stats {
            Some(stats) => debug!(
                image = %data.name,
                min = stats.min,
                max = stats.max,
                mean = stats.mean,
                "computed statistics"
            ),
            None => debug!(image = %data.name, "no objects, statistics skipped"),
        }
        data.stats = stats;
        Ok(data)
    }

    fn name(&self) -> &str {
        "Statistics"
    }
}
