use anyhow::Result;
use clap::Parser;
use img_prep::cli::Args;
use img_prep::{batch, logger, Config};
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    let config = Config::load(&args.config)?;

    // Directories in the settings file are relative to the file itself.
    let root = match args.config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let summary = batch::run_batch(&config, root, args.threads)?;
    summary.print();

    Ok(())
}
