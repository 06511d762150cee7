use crate::constants::BYTES_PER_MB;
use crate::info;

/// Per-file classification produced by the processing pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Re-encoded as JPEG at the target quality
    Recompressed { new_size: u64 },
    /// JPEG already at or below the target quality, copied verbatim
    Skipped,
    /// Container format could not be identified at all
    Unrecognized,
}

/// One file's result, consumed by the summary fold and then discarded.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub file_name: String,
    pub original_size: u64,
    pub outcome: Outcome,
}

/// Aggregate totals for a whole run.
///
/// Accumulated at a single ownership point: the orchestrator folds every
/// `ProcessingResult` into one summary after the parallel phase, so the
/// totals never see concurrent writes.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub edited: usize,
    pub not_edited: usize,
    pub failed: usize,
    /// Bytes scanned across every classified file
    pub total_original_bytes: u64,
    pub recompressed_original_bytes: u64,
    pub recompressed_new_bytes: u64,
    pub unprocessed: Vec<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ProcessingResult) {
        self.total_original_bytes += result.original_size;
        match result.outcome {
            Outcome::Recompressed { new_size } => {
                self.edited += 1;
                self.recompressed_original_bytes += result.original_size;
                self.recompressed_new_bytes += new_size;
            }
            Outcome::Skipped => {
                self.not_edited += 1;
            }
            Outcome::Unrecognized => {
                self.unprocessed.push(result.file_name.clone());
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Bytes saved by recompression, over recompressed files only;
    /// skipped and unrecognized files do not dilute the figure.
    /// Negative when re-encoding grew the batch.
    pub fn bytes_saved(&self) -> i64 {
        self.recompressed_original_bytes as i64 - self.recompressed_new_bytes as i64
    }

    /// Saved bytes in binary megabytes (1 MB = 1,048,576 bytes).
    pub fn megabytes_saved(&self) -> f64 {
        self.bytes_saved() as f64 / BYTES_PER_MB as f64
    }

    /// Files that were classified, one way or another.
    pub fn classified_total(&self) -> usize {
        self.edited + self.not_edited + self.unprocessed.len()
    }

    /// Render the end-of-run report.
    pub fn print(&self) {
        info!("\n📊 Optimization summary:");
        info!("  ✏️  Edited images: {}", self.edited);
        info!("  📦 Unedited images: {}", self.not_edited);
        info!("  💾 Disk space saved: {:.2} MB", self.megabytes_saved());

        if self.failed > 0 {
            info!("  ⚠️  Failed files: {}", self.failed);
        }

        if !self.unprocessed.is_empty() {
            info!("\nUnprocessed files:");
            for name in &self.unprocessed {
                info!("  - {}", name);
            }
        }
    }
}
