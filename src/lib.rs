pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod processing;
pub mod quality;
pub mod report;

pub use batch::{collect_input_files, run_batch};
pub use config::{Config, OutputLayout};
pub use error::{OptimizeError, Result};
pub use processing::{process_file, ProcessOptions};
pub use quality::estimate_quality;
pub use report::{Outcome, ProcessingResult, RunSummary};
