//! Statistics department verification
//!
//! Two variants share the `University` record:
//! - `fast`: three subdomain guesses plus one path fallback
//! - `exhaustive`: pattern probes, then site search, then academic sections

pub mod exhaustive;
pub mod fast;
pub mod scoring;

use crate::config::{pause, CrawlConfig};
use crate::http::Fetch;
use crate::types::University;

use exhaustive::ExhaustiveVerifier;

/// Found/checked tallies for a verification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    pub checked: usize,
    pub found: usize,
}

impl VerifySummary {
    pub fn success_rate(&self) -> f64 {
        if self.checked == 0 {
            0.0
        } else {
            self.found as f64 / self.checked as f64 * 100.0
        }
    }
}

fn short_name(name: &str) -> String {
    name.chars().take(50).collect()
}

/// Quick-verify the first `limit` universities (all when None) in place
pub fn verify_all_fast(
    fetcher: &dyn Fetch,
    config: &CrawlConfig,
    universities: &mut [University],
    limit: Option<usize>,
) -> VerifySummary {
    let total = limit.map_or(universities.len(), |l| l.min(universities.len()));
    let mut summary = VerifySummary::default();

    println!("\nQuick verification of {} universities...", total);
    println!("{}", "=".repeat(80));

    for (i, university) in universities.iter_mut().take(total).enumerate() {
        print!("[{:3}/{}] {:<50} ", i + 1, total, short_name(&university.name));

        let found = fast::quick_verify(fetcher, config, university);
        if found.is_some() {
            println!("✅ FOUND");
            summary.found += 1;
        } else {
            println!("❌");
        }
        university.mark_verified(found, None);
        summary.checked += 1;

        pause(config.delays.between_fast);
    }

    println!("{}", "=".repeat(80));
    println!(
        "SUMMARY: {}/{} universities have statistics departments",
        summary.found, summary.checked
    );
    println!("Success rate: {:.1}%", summary.success_rate());

    summary
}

/// Run the exhaustive verifier over the first `limit` universities in place
pub fn verify_all_exhaustive(
    fetcher: &dyn Fetch,
    config: &CrawlConfig,
    universities: &mut [University],
    limit: usize,
) -> VerifySummary {
    let verifier = ExhaustiveVerifier::new(fetcher, config);
    let mut summary = VerifySummary::default();

    println!("Will verify first {} universities", limit.min(universities.len()));
    println!("{}", "=".repeat(80));

    for university in universities.iter_mut().take(limit) {
        if verifier.verify(university) {
            summary.found += 1;
        }
        summary.checked += 1;

        pause(config.delays.between_exhaustive);
    }

    println!("\n{}", "=".repeat(80));
    println!("VERIFICATION COMPLETE");
    println!("{}", "=".repeat(80));

    summary
}
