//! PhD Requirements Binary
//!
//! Reads the universities-with-statistics JSON and scrapes PhD admission
//! requirements from each department site.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use stats_scout::config::load_config;
use stats_scout::http::HttpFetcher;
use stats_scout::logging;
use stats_scout::report::render_requirements_summary;
use stats_scout::requirements::scrape_all;
use stats_scout::storage::{
    load_json, save_json, save_text, REQUIREMENTS_REPORT, REQUIREMENTS_RESULTS, STATS_ONLY_RESULTS,
};
use stats_scout::types::University;

#[derive(Debug, Parser)]
#[command(about = "Scrape PhD statistics admission requirements")]
struct Args {
    /// JSON array of universities with a department URL
    #[arg(long, default_value = STATS_ONLY_RESULTS)]
    input: PathBuf,

    /// Directory for the JSON and text outputs
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of universities to scrape
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Scrape every university, ignoring --limit
    #[arg(long)]
    all: bool,

    /// Crawl config (YAML); defaults to $ROOT/config/crawler.yml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;

    let universities: Vec<University> = load_json(&args.input)
        .context("Run the verification step first to generate the statistics-only list")?;
    println!("Loaded {} universities with statistics departments", universities.len());

    let limit = if args.all { None } else { Some(args.limit) };
    let results = scrape_all(&fetcher, &config, &universities, limit);

    let json_path = args.output_dir.join(REQUIREMENTS_RESULTS);
    save_json(&json_path, &results)?;
    println!("Requirements saved to {:?}", json_path);

    let report_path = args.output_dir.join(REQUIREMENTS_REPORT);
    save_text(&report_path, &render_requirements_summary(&results))?;
    println!("Summary report saved to {:?}", report_path);

    Ok(())
}
