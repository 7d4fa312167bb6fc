//! PhD Requirements Scraper
//!
//! For each university with a known department URL:
//! - discover up to three PhD program pages
//! - extract requirement fields from each page
//! - merge them into one record per university

pub mod discovery;
pub mod extract;
pub mod merge;

use crate::config::{pause, CrawlConfig};
use crate::http::Fetch;
use crate::types::{ProgramRequirements, University};

/// Scrape one university; None when no page yields any data
pub fn scrape_university(
    fetcher: &dyn Fetch,
    config: &CrawlConfig,
    university: &University,
) -> Option<ProgramRequirements> {
    let Some(dept_url) = university.dept_url.as_deref() else {
        tracing::warn!(university = %university.name, "no department URL, skipping");
        return None;
    };

    println!("Scraping requirements for {}...", university.name);

    let phd_urls = discovery::find_phd_pages(fetcher, config, dept_url);
    if phd_urls.is_empty() {
        println!("  No PhD pages found for {}", university.name);
        return None;
    }

    let mut pages = Vec::new();
    for url in &phd_urls {
        println!("  Checking: {}", url);
        match extract::extract_requirements(fetcher, config, url) {
            Some(reqs) => pages.push(reqs),
            None => tracing::debug!(url = %url, "no requirements extracted"),
        }
    }

    if pages.is_empty() {
        return None;
    }

    Some(ProgramRequirements {
        university: university.name.clone(),
        state: university.state.clone(),
        university_url: university.url.clone(),
        dept_url: dept_url.to_string(),
        requirements: merge::combine(&pages),
        last_updated: chrono::Local::now().format("%Y-%m-%d").to_string(),
    })
}

/// Scrape the first `limit` universities (all when None)
pub fn scrape_all(
    fetcher: &dyn Fetch,
    config: &CrawlConfig,
    universities: &[University],
    limit: Option<usize>,
) -> Vec<ProgramRequirements> {
    let total = limit.map_or(universities.len(), |l| l.min(universities.len()));
    let mut results = Vec::new();

    println!("Scraping PhD requirements for {} universities...", total);
    println!("{}", "=".repeat(80));

    for (i, university) in universities.iter().take(total).enumerate() {
        println!("[{:2}/{}] {}", i + 1, total, university.name);

        match scrape_university(fetcher, config, university) {
            Some(reqs) => {
                results.push(reqs);
                println!("  ✅ Requirements extracted");
            }
            None => println!("  ❌ No requirements found"),
        }

        pause(config.delays.between_requirements);
        println!();
    }

    println!("{}", "=".repeat(80));
    println!("Successfully extracted requirements for {} universities", results.len());

    results
}
