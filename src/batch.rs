//! Directory enumeration and run orchestration.

use crate::config::{Config, OutputLayout};
use crate::error::{OptimizeError, Result};
use crate::processing::{process_file, ProcessOptions};
use crate::report::{ProcessingResult, RunSummary};
use crate::{error, info, warn};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect candidate files from the input directory.
///
/// Non-recursive, hidden entries skipped, sorted by name so reports are
/// deterministic. No extension filter: files the codec cannot identify
/// must still be enumerated so they land in the unprocessed list.
pub fn collect_input_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(OptimizeError::InputDirectoryMissing(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir)
        .max_depth(1)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry?;
        if entry.path().is_file() {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Run the whole pipeline: enumerate, classify and transform every file
/// across a bounded worker pool, fold the results into one summary.
pub fn run_batch(config: &Config, root: &Path, threads: Option<usize>) -> Result<RunSummary> {
    let layout = OutputLayout::resolve(config, root);

    let files = collect_input_files(&layout.input)?;
    if files.is_empty() {
        return Err(OptimizeError::InputDirectoryEmpty(layout.input.clone()));
    }

    info!("🚀 Optimizing {} files in {}", files.len(), layout.input.display());

    // Output directories exist before any worker starts.
    layout.create_output_dirs()?;
    warn_on_name_collisions(&files);

    let workers = threads
        .unwrap_or_else(num_cpus::get)
        .clamp(1, files.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("Failed to build Rayon thread pool");

    let progress = if crate::logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(ProgressStyle::default_bar());
        bar
    };

    let options = ProcessOptions::from(config);
    let results: Vec<Option<ProcessingResult>> = pool.install(|| {
        files
            .par_iter()
            .map(|input_path| {
                let outcome = match process_file(input_path, &layout, &options) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        error!(
                            "Error processing file {}: {}",
                            input_path
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| input_path.display().to_string()),
                            e
                        );
                        None
                    }
                };
                progress.inc(1);
                outcome
            })
            .collect()
    });

    progress.finish_and_clear();

    // Single ownership point: fold collected results, in input order.
    let mut summary = RunSummary::new();
    for result in &results {
        match result {
            Some(result) => summary.record(result),
            None => summary.record_failure(),
        }
    }

    Ok(summary)
}

/// Two inputs with the same stem map to the same `.jpg` output name.
/// The later file overwrites; say so up front instead of silently.
fn warn_on_name_collisions(files: &[PathBuf]) {
    let mut stems: HashMap<String, &Path> = HashMap::new();
    for file in files {
        let stem = match file.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };
        if let Some(previous) = stems.insert(stem.clone(), file) {
            warn!(
                "Output name collision: {} and {} both produce {}.jpg (last one wins)",
                previous.display(),
                file.display(),
                stem
            );
        }
    }
}
