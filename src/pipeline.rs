use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::models::{ImageResult, ObjectPoint, PixelGrid, Temperature};
use crate::stats::TemperatureStats;

/// Data that flows through the pipeline for a single image
///
/// Each step fills in the field it is responsible for; later steps read the
/// fields of earlier ones. The grid itself is never modified.
#[derive(Debug, Clone)]
pub struct PipelineData {
    /// Source name of the image (usually its file name)
    pub name: String,

    /// The acquired pixel grid (shared, read-only)
    pub grid: Arc<PixelGrid>,

    /// Boundary columns, set by the boundary step
    pub boundaries: Option<BTreeSet<u32>>,

    /// Object pixels in scan order, set by the object step
    pub objects: Option<Vec<ObjectPoint>>,

    /// One temperature per object, set by the temperature step
    pub temperatures: Option<Vec<Temperature>>,

    /// Summary statistics, set by the statistics step when there is at least one object
    pub stats: Option<TemperatureStats>,
}

impl PipelineData {
    pub fn new(name: impl Into<String>, grid: Arc<PixelGrid>) -> Self {
        Self {
            name: name.into(),
            grid,
            boundaries: None,
            objects: None,
            temperatures: None,
            stats: None,
        }
    }

    pub fn boundaries(&self) -> Result<&BTreeSet<u32>> {
        self.boundaries
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Missing boundaries for {}", self.name))
    }

    pub fn objects(&self) -> Result<&[ObjectPoint]> {
        self.objects
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Missing objects for {}", self.name))
    }

    pub fn temperatures(&self) -> Result<&[Temperature]> {
        self.temperatures
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Missing temperatures for {}", self.name))
    }

    /// Turn the finished pipeline data into the per-image result
    pub fn into_result(self) -> Result<ImageResult> {
        if self.temperatures()?.is_empty() {
            return Ok(ImageResult::no_objects(self.name));
        }
        match self.stats {
            Some(stats) => Ok(ImageResult::measured(self.name, stats)),
            None => Err(anyhow::anyhow!("Missing statistics for {}", self.name)),
        }
    }

    /// Debug output file name: the full source name with path separators flattened
    fn debug_file_name(&self) -> String {
        let flat: String = self
            .name
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
                _ => '_',
            })
            .collect();
        format!("{}.png", flat)
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Write a debug image; an existing file is never replaced
    fn save(&self, dir_name: &str, file_name: &str, img: &RgbaImage) -> Result<PathBuf> {
        let dir = self.output_dir.join(dir_name);
        std::fs::create_dir_all(&dir)?;

        let output_path = dir.join(file_name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&output_path)
            .with_context(|| {
                format!(
                    "Debug output already exists or cannot be created: {}",
                    output_path.display()
                )
            })?;

        let mut writer = BufWriter::new(file);
        img.write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        writer.flush()?;
        Ok(output_path)
    }
}

/// Context available to all pipeline steps
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Read what earlier steps produced and add this step's output
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug directory names)
    fn name(&self) -> &str;

    /// Optional picture of this step's output, saved in debug mode
    fn visualize(&self, _data: &PipelineData) -> Option<RgbaImage> {
        None
    }
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Names of the configured steps, in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step on one image
    pub fn run(&self, name: &str, grid: Arc<PixelGrid>) -> Result<PipelineData> {
        self.run_partial(name, grid, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(
        &self,
        name: &str,
        grid: Arc<PixelGrid>,
        num_steps: usize,
    ) -> Result<PipelineData> {
        let mut data = PipelineData::new(name, grid);

        if let Some(debug_config) = &self.context.debug {
            let file_name = data.debug_file_name();
            let path = debug_config.save("00_input", &file_name, &data.grid.to_rgba_image())?;
            debug!(image = %name, path = %path.display(), "saved debug input");
        }

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            debug!(image = %name, step = step.name(), "running step {}", step_idx + 1);

            data = step.process(data, &self.context)?;

            if let Some(debug_config) = &self.context.debug {
                if let Some(visual) = step.visualize(&data) {
                    let dir_name = format!(
                        "{:02}_{}",
                        step_idx + 1,
                        step.name().to_lowercase().replace(' ', "_")
                    );
                    let path = debug_config.save(&dir_name, &data.debug_file_name(), &visual)?;
                    debug!(image = %name, path = %path.display(), "saved debug output");
                }
            }
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
