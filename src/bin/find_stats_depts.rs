//! Exhaustive Verifier Binary
//!
//! Runs URL patterns, site search and targeted search for the first N
//! universities and saves the full list, verified or not, as JSON.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use stats_scout::config::load_config;
use stats_scout::http::HttpFetcher;
use stats_scout::logging;
use stats_scout::report::render_verification_results;
use stats_scout::storage::{load_university_list, save_json, EXHAUSTIVE_RESULTS, UNIVERSITY_LIST};
use stats_scout::verify::verify_all_exhaustive;

#[derive(Debug, Parser)]
#[command(about = "Thoroughly search university sites for statistics departments")]
struct Args {
    /// Pipe-delimited `name|url|state` list
    #[arg(long, default_value = UNIVERSITY_LIST)]
    input: PathBuf,

    /// Directory for the JSON output
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of universities to verify
    #[arg(long, default_value_t = 25)]
    limit: usize,

    /// Crawl config (YAML); defaults to $ROOT/config/crawler.yml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;

    println!("Starting comprehensive verification of US universities with Statistics departments...");
    let mut universities = load_university_list(&args.input)?;

    verify_all_exhaustive(&fetcher, &config, &mut universities, args.limit);

    print!("{}", render_verification_results(&universities));

    let output = args.output_dir.join(EXHAUSTIVE_RESULTS);
    save_json(&output, &universities)?;
    println!("Results saved to {:?}", output);

    Ok(())
}
