//! Runs the analysis pipeline over a set of image files.
//!
//! Every image is analyzed independently; a failure is recorded in that
//! image's result and never stops the rest of the batch. Results come back in
//! input order regardless of completion order.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::acquisition;
use crate::error::AcquisitionError;
use crate::models::{ImageOutcome, ImageResult, PixelGrid};
use crate::pipeline::{Pipeline, PipelineData};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of images analyzed at the same time
    pub jobs: usize,
    /// Attempt every directory entry instead of only known image extensions
    pub include_all_files: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: std::thread::available_parallelism().map_or(1, |n| n.get()),
            include_all_files: false,
        }
    }
}

/// Expand the given paths into the list of files to analyze
///
/// Directories contribute their regular files sorted by name, filtered by
/// image extension unless `include_all_files` is set. Other paths are taken
/// as given, so a missing file shows up as a failed result later.
pub fn collect_inputs(inputs: &[PathBuf], include_all_files: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(input)
            .with_context(|| format!("Failed to list directory {}", input.display()))?
        {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if !include_all_files && !acquisition::has_image_extension(&path) {
                debug!(path = %path.display(), "skipping non-image file");
                continue;
            }
            entries.push(path);
        }
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        files.extend(entries);
    }

    Ok(files)
}

/// Name an image is reported under
pub fn image_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Names to report for each path, in order
///
/// The file name is used unless another path in the batch has the same file
/// name; those images are reported under their full path instead.
pub fn report_names(paths: &[PathBuf]) -> Vec<String> {
    let mut owners: HashMap<String, &Path> = HashMap::new();
    let mut ambiguous: HashSet<String> = HashSet::new();

    for path in paths {
        let name = image_name(path);
        match owners.get(&name) {
            Some(owner) if *owner != path.as_path() => {
                ambiguous.insert(name);
            }
            Some(_) => {}
            None => {
                owners.insert(name, path);
            }
        }
    }

    paths
        .iter()
        .map(|path| {
            let name = image_name(path);
            if ambiguous.contains(&name) {
                path.display().to_string()
            } else {
                name
            }
        })
        .collect()
}

/// Run the pipeline on an already acquired grid
pub fn analyze_grid(pipeline: &Pipeline, name: &str, grid: Arc<PixelGrid>) -> ImageResult {
    match pipeline.run(name, grid).and_then(PipelineData::into_result) {
        Ok(result) => result,
        Err(err) => {
            warn!(image = %name, "analysis failed: {:#}", err);
            ImageResult::failed(name, format!("{:#}", err))
        }
    }
}

/// Run the pipeline on the outcome of acquiring an image
///
/// An acquisition failure (including a malformed grid) becomes a failed result.
pub fn analyze_acquired(
    pipeline: &Pipeline,
    name: &str,
    acquired: Result<PixelGrid, AcquisitionError>,
) -> ImageResult {
    let result = match acquired {
        Ok(grid) => analyze_grid(pipeline, name, Arc::new(grid)),
        Err(err) => {
            let err = anyhow::Error::from(err);
            warn!(image = %name, "acquisition failed: {:#}", err);
            ImageResult::failed(name, format!("{:#}", err))
        }
    };
    log_result(&result);
    result
}

/// Acquire one image file and run the pipeline on it, reported under its file name
pub fn analyze_file(pipeline: &Pipeline, path: &Path) -> ImageResult {
    analyze_named_file(pipeline, &image_name(path), path)
}

pub fn analyze_named_file(pipeline: &Pipeline, name: &str, path: &Path) -> ImageResult {
    analyze_acquired(pipeline, name, acquisition::load_grid(path))
}

/// Analyze all files concurrently, at most `jobs` at a time
pub async fn analyze_files(
    pipeline: Arc<Pipeline>,
    paths: Vec<PathBuf>,
    jobs: usize,
) -> Vec<ImageResult> {
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();
    let names = report_names(&paths);

    for (index, (path, name)) in paths.into_iter().zip(names.iter().cloned()).enumerate() {
        let pipeline = pipeline.clone();
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let task_name = name.clone();
            let result = tokio::task::spawn_blocking(move || {
                analyze_named_file(&pipeline, &task_name, &path)
            })
            .await
            .unwrap_or_else(|err| {
                ImageResult::failed(name, format!("analysis task panicked: {}", err))
            });
            (index, result)
        });
    }

    let mut results: Vec<Option<ImageResult>> = vec![None; names.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(err) => warn!("analysis task did not complete: {}", err),
        }
    }

    results
        .into_iter()
        .zip(names)
        .map(|(result, name)| {
            result.unwrap_or_else(|| ImageResult::failed(name, "analysis task was aborted"))
        })
        .collect()
}

/// Collect the inputs and analyze them
pub async fn run_batch(
    pipeline: Arc<Pipeline>,
    inputs: &[PathBuf],
    options: &BatchOptions,
) -> Result<Vec<ImageResult>> {
    let paths = collect_inputs(inputs, options.include_all_files)?;
    info!(images = paths.len(), jobs = options.jobs, "starting analysis");
    Ok(analyze_files(pipeline, paths, options.jobs).await)
}

fn log_result(result: &ImageResult) {
    match &result.outcome {
        ImageOutcome::Measured(stats) => info!(
            image = %result.name,
            objects = stats.samples,
            min = stats.min,
            max = stats.max,
            mean = stats.mean,
            "analyzed"
        ),
        ImageOutcome::NoObjects => info!(image = %result.name, "no objects detected"),
        ImageOutcome::Failed { .. } => {}
    }
}
