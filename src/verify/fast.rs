//! Fast verification: three subdomain guesses checked by page title,
//! then a single `/statistics` path probe.

use scraper::Html;

use crate::config::{pause, CrawlConfig};
use crate::html::{page_title, registered_domain, trim_base};
use crate::http::{fetch_ok, Fetch};
use crate::types::{DeptMatch, MatchMethod, University};

const SUBDOMAINS: [&str; 3] = ["statistics", "stat", "stats"];
const TITLE_INDICATORS: [&str; 3] = ["statistics", "statistical", "stat"];

/// Return the first department URL found by the quick patterns
pub fn quick_verify(fetcher: &dyn Fetch, config: &CrawlConfig, university: &University) -> Option<DeptMatch> {
    if let Some(domain) = registered_domain(&university.url) {
        for sub in SUBDOMAINS {
            let candidate = format!("https://{}.{}", sub, domain);
            match fetcher.get(&candidate, config.timeouts.quick_probe()) {
                Ok(page) => {
                    if page.is_ok() {
                        let title = page_title(&Html::parse_document(&page.body)).to_lowercase();
                        if TITLE_INDICATORS.iter().any(|i| title.contains(i)) {
                            return Some(DeptMatch::new(candidate, MatchMethod::FastSubdomain));
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(url = %candidate, error = %e, "subdomain probe failed");
                    continue;
                }
            }
            pause(config.delays.quick_probe);
        }
    }

    let path_url = format!("{}/statistics", trim_base(&university.url));
    fetch_ok(fetcher, &path_url, config.timeouts.quick_probe())
        .map(|_| DeptMatch::new(path_url, MatchMethod::FastPath))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::http::StaticFetcher;

    fn config() -> CrawlConfig {
        CrawlConfig {
            delays: Delays::none(),
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn test_stat_subdomain_beats_path_fallback() {
        let fetcher = StaticFetcher::new()
            .status("https://statistics.purdue.edu", 404)
            .page("https://stat.purdue.edu", "<html><head><title>Department of Statistics</title></head></html>")
            .page("https://www.purdue.edu/statistics", "<html></html>");
        let uni = University::new("Purdue University", "https://www.purdue.edu/", "Indiana");

        let found = quick_verify(&fetcher, &config(), &uni).unwrap();
        assert_eq!(found.url, "https://stat.purdue.edu");
        assert_eq!(found.method, MatchMethod::FastSubdomain);
        assert!(!fetcher.was_requested("https://www.purdue.edu/statistics"));
    }

    #[test]
    fn test_subdomain_without_title_keyword_is_skipped() {
        let fetcher = StaticFetcher::new()
            .page("https://statistics.a.edu", "<title>Welcome</title>")
            .page("https://www.a.edu/statistics", "<html></html>");
        let uni = University::new("A", "https://www.a.edu", "Ohio");

        let found = quick_verify(&fetcher, &config(), &uni).unwrap();
        assert_eq!(found.url, "https://www.a.edu/statistics");
        assert_eq!(found.method, MatchMethod::FastPath);
    }

    #[test]
    fn test_nothing_found() {
        let fetcher = StaticFetcher::new();
        let uni = University::new("A", "https://www.a.edu", "Ohio");
        assert!(quick_verify(&fetcher, &config(), &uni).is_none());
        assert_eq!(fetcher.requests().len(), 4);
    }
}
