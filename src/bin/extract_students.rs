//! Student Roster Binary
//!
//! Fetches a department's graduate-student page and writes
//! `Name,Program,Office,Email` rows to a CSV file.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use stats_scout::config::load_config;
use stats_scout::http::HttpFetcher;
use stats_scout::logging;
use stats_scout::storage::STUDENTS_CSV;
use stats_scout::students::{fetch_students, write_students_csv, DEFAULT_STUDENT_PAGE};

#[derive(Debug, Parser)]
#[command(about = "Extract the graduate-student roster from a department page")]
struct Args {
    /// Roster page to read
    #[arg(long, default_value = DEFAULT_STUDENT_PAGE)]
    url: String,

    /// Directory for the CSV output
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Crawl config (YAML); defaults to $ROOT/config/crawler.yml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;

    println!("Extracting student data from {}...", args.url);
    let students = fetch_students(&fetcher, &args.url, config.timeouts.student_page());

    if students.is_empty() {
        println!("No student data found");
        return Ok(());
    }

    let output = args.output_dir.join(STUDENTS_CSV);
    write_students_csv(&output, &students)?;
    println!("Saved {} students to {:?}", students.len(), output);

    println!("\nFirst 3 entries:");
    for (i, s) in students.iter().take(3).enumerate() {
        println!("{}. {} | {} | {} | {}", i + 1, s.name, s.program, s.office, s.email);
    }

    Ok(())
}
