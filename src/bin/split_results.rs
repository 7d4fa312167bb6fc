//! Result Splitter Binary
//!
//! Filters a verification JSON file down to universities with a statistics
//! department and writes the JSON subset plus a state-grouped text list.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use stats_scout::logging;
use stats_scout::splitter::{split_file, SplitOutputs};
use stats_scout::storage::VERIFIED_RESULTS;

#[derive(Debug, Parser)]
#[command(about = "Split verification results into statistics-only outputs")]
struct Args {
    /// Verification results (JSON array)
    #[arg(long, default_value = VERIFIED_RESULTS)]
    input: PathBuf,

    /// Directory for the JSON and text outputs
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    split_file(&args.input, &SplitOutputs::in_dir(&args.output_dir))?;
    Ok(())
}
