use crate::constants::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-prep",
    about = "Batch-prepare a directory of images for web publishing",
    long_about = "img-prep scans a directory of images and prepares them for web publishing: \
                  images are recompressed to a target JPEG quality, JPEGs already at or below \
                  that quality are copied through untouched, and every image gets a fixed-size \
                  cropped thumbnail. The run ends with a summary of counts and disk space saved.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-prep\n  \
    img-prep --config site/config.json\n  \
    img-prep -j 8 --verbose\n  \
    img-prep --quiet"
)]
pub struct Args {
    #[arg(
        short = 'c',
        long,
        default_value = DEFAULT_CONFIG_FILE,
        help = "Path to the JSON settings file",
        long_help = "Path to the JSON settings file. Directory values inside the file are \
                     resolved relative to the file's own directory."
    )]
    pub config: PathBuf,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of worker threads for processing files. \
                     If not specified, uses the number of CPU cores, \
                     capped at the number of input files."
    )]
    pub threads: Option<usize>,

    #[arg(short = 'q', long, help = "Suppress progress and summary output")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Per-file classification output")]
    pub verbose: bool,
}
