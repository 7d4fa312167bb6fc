//! PhD program page discovery under a department URL.

use scraper::Html;

use crate::config::{pause, CrawlConfig};
use crate::html::{links, resolve_url, trim_base, PageText};
use crate::http::{fetch_ok, Fetch};

const PHD_PATTERNS: [&str; 16] = [
    "/phd",
    "/doctoral",
    "/graduate",
    "/graduate-programs",
    "/phd-program",
    "/doctoral-program",
    "/graduate/phd",
    "/academics/phd",
    "/academics/graduate",
    "/programs/phd",
    "/programs/doctoral",
    "/admissions",
    "/admissions/phd",
    "/graduate-admissions",
    "/prospective-students",
    "/apply",
];

const PHD_INDICATORS: [&str; 9] = [
    "phd program",
    "doctoral program",
    "ph.d.",
    "doctorate",
    "graduate program",
    "phd in statistics",
    "doctoral statistics",
    "admission requirements",
    "application requirements",
];

const LINK_KEYWORDS: [&str; 5] = ["phd", "doctoral", "graduate", "admission", "apply"];
const SKIP_TOKENS: [&str; 4] = ["news", "events", "faculty", "contact"];

pub const MAX_PHD_PAGES: usize = 3;

/// Up to three pages likely to describe the PhD program
pub fn find_phd_pages(fetcher: &dyn Fetch, config: &CrawlConfig, dept_url: &str) -> Vec<String> {
    let base = trim_base(dept_url);
    let mut phd_urls = Vec::new();

    for pattern in PHD_PATTERNS {
        let url = format!("{}{}", base, pattern);
        if let Some(page) = fetch_ok(fetcher, &url, config.timeouts.pattern_probe()) {
            if PageText::parse(&page.body).mentions_any(&PHD_INDICATORS) {
                println!("    Found PhD page: {}", url);
                phd_urls.push(url);
            }
        }
        pause(config.delays.phd_probe);
    }

    if phd_urls.is_empty() {
        if let Some(page) = fetch_ok(fetcher, dept_url, config.timeouts.link_probe()) {
            phd_urls = phd_links(dept_url, &page.body);
        }
    }

    phd_urls.truncate(MAX_PHD_PAGES);
    phd_urls
}

/// PhD-flavoured links on the department page, deduplicated, at most three
pub fn phd_links(dept_url: &str, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut found: Vec<String> = Vec::new();

    for link in links(&document) {
        let href = link.href.to_lowercase();
        let text = link.text.to_lowercase();
        if !LINK_KEYWORDS.iter().any(|k| href.contains(k) || text.contains(k)) {
            continue;
        }

        let Some(full_url) = resolve_url(dept_url, &link.href) else {
            continue;
        };
        let lower = full_url.to_lowercase();
        if found.contains(&full_url) || SKIP_TOKENS.iter().any(|s| lower.contains(s)) {
            continue;
        }

        found.push(full_url);
        if found.len() >= MAX_PHD_PAGES {
            break;
        }
    }

    found
}
