//! Fast Verifier Binary
//!
//! Quick subdomain/path check of every university in the list. Writes:
//! - all results as JSON
//! - universities with a statistics department as JSON
//! - a state-grouped text list

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use stats_scout::config::load_config;
use stats_scout::http::HttpFetcher;
use stats_scout::logging;
use stats_scout::report::render_detailed_results;
use stats_scout::splitter::{write_split, SplitOutputs};
use stats_scout::storage::{load_university_list, save_json, UNIVERSITY_LIST, VERIFIED_RESULTS};
use stats_scout::verify::verify_all_fast;

#[derive(Debug, Parser)]
#[command(about = "Quickly check which universities have a statistics department")]
struct Args {
    /// Pipe-delimited `name|url|state` list
    #[arg(long, default_value = UNIVERSITY_LIST)]
    input: PathBuf,

    /// Directory for the JSON and text outputs
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Only check the first N universities
    #[arg(long)]
    limit: Option<usize>,

    /// Crawl config (YAML); defaults to $ROOT/config/crawler.yml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;

    let mut universities = load_university_list(&args.input)?;
    verify_all_fast(&fetcher, &config, &mut universities, args.limit);

    print!("{}", render_detailed_results(&universities));

    let all_path = args.output_dir.join(VERIFIED_RESULTS);
    save_json(&all_path, &universities)?;
    println!("All results saved to {:?}", all_path);

    write_split(&universities, &SplitOutputs::in_dir(&args.output_dir))?;

    Ok(())
}
