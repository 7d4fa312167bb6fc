//! Exhaustive verification
//!
//! Three methods tried in order, first success wins:
//! - URL patterns: subdomain guesses, then path guesses, scored by keywords
//! - Site search: statistics-flavoured links on the main page
//! - Targeted search: links found on academic section index pages

use scraper::Html;

use crate::config::{pause, CrawlConfig};
use crate::html::{links, registered_domain, resolve_url, trim_base, PageText};
use crate::http::{fetch_ok, Fetch};
use crate::types::{DeptMatch, MatchMethod, University};
use crate::verify::scoring::{
    has_definitive_sign, is_site_search_match, is_statistics_link, link_priority, score_department_page, PageScore,
};

pub const FAILURE_TAG: &str = "exhaustive_search_failed";

const SUBDOMAINS: [&str; 9] = [
    "statistics",
    "stat",
    "stats",
    "biostat",
    "biostatistics",
    "math",
    "mathematics",
    "data",
    "datascience",
];

const PATH_PATTERNS: &[&str] = &[
    // statistics proper
    "/statistics",
    "/stats",
    "/stat",
    "/department-of-statistics",
    "/dept-of-statistics",
    "/departments/statistics",
    "/depts/statistics",
    "/academics/statistics",
    "/academic/statistics",
    "/schools/statistics",
    "/school-of-statistics",
    "/colleges/statistics",
    "/college-of-statistics",
    // combined math and statistics
    "/mathematics-statistics",
    "/math-statistics",
    "/math-stat",
    "/mathematical-sciences",
    "/math-sciences",
    "/departments/mathematics-statistics",
    "/departments/math-stat",
    "/departments/mathematical-sciences",
    "/math-and-statistics",
    "/mathematics-and-statistics",
    // statistical science
    "/statistical-science",
    "/statistical-sciences",
    "/dept-statistical-science",
    "/department-statistical-science",
    // data science
    "/statistics-data-science",
    "/data-science-statistics",
    "/statistics-and-data-science",
    // biostatistics
    "/biostatistics",
    "/biostat",
    "/biostats",
    "/departments/biostatistics",
    // graduate programs
    "/programs/statistics",
    "/graduate/statistics",
    "/graduate-programs/statistics",
    "/phd/statistics",
    "/doctoral/statistics",
    // colleges and schools
    "/cas/statistics",
    "/liberal-arts/statistics",
    "/arts-sciences/statistics",
    "/college-arts-sciences/statistics",
    "/school-of-arts-and-sciences/statistics",
    "/academics/departments/statistics",
    "/academic-departments/statistics",
    "/faculty/statistics",
    "/research/statistics",
    // alternative naming
    "/applied-statistics",
    "/theoretical-statistics",
    "/computational-statistics",
];

/// Main-page hrefs never worth following
const SKIP_PATTERNS: [&str; 8] = [
    "news",
    "events",
    "calendar",
    "contact",
    "about",
    "admissions",
    "library",
    "student",
];

const ACADEMIC_SECTIONS: [&str; 7] = [
    "/academics",
    "/departments",
    "/schools",
    "/colleges",
    "/graduate",
    "/research",
    "/faculty",
];

const MAX_SITE_CANDIDATES: usize = 15;

pub struct ExhaustiveVerifier<'a> {
    fetcher: &'a dyn Fetch,
    config: &'a CrawlConfig,
}

impl<'a> ExhaustiveVerifier<'a> {
    pub fn new(fetcher: &'a dyn Fetch, config: &'a CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    /// Run every method in turn and record the outcome on `university`
    pub fn verify(&self, university: &mut University) -> bool {
        println!("Checking {}...", university.name);

        println!("  Method 1: URL patterns...");
        let mut found = self.find_by_url_patterns(university);

        if found.is_none() {
            println!("  Method 2: Site search...");
            found = self.search_main_site(university);
        }

        if found.is_none() {
            println!("  Method 3: Targeted search...");
            found = self.search_academic_sections(university);
        }

        match found {
            Some(m) => {
                println!("  ✅ SUCCESS: {} has statistics department", university.name);
                println!("      URL: {} ({})", m.url, m.method);
                university.mark_verified(Some(m), None);
                true
            }
            None => {
                println!("  ❌ NOT FOUND: Could not locate statistics department for {}", university.name);
                university.mark_verified(None, Some(FAILURE_TAG));
                false
            }
        }
    }

    fn probe_and_score(&self, url: &str) -> Option<PageScore> {
        let page = fetch_ok(self.fetcher, url, self.config.timeouts.pattern_probe())?;
        Some(score_department_page(&PageText::parse(&page.body)))
    }

    /// Subdomain guesses first, then path guesses under the main URL
    pub fn find_by_url_patterns(&self, university: &University) -> Option<DeptMatch> {
        let subdomains: Vec<String> = match registered_domain(&university.url) {
            Some(domain) => SUBDOMAINS.iter().map(|s| format!("https://{}.{}", s, domain)).collect(),
            None => vec![],
        };

        for url in &subdomains {
            match self.probe_and_score(url) {
                Some(PageScore::Strong) => return Some(DeptMatch::new(url.as_str(), MatchMethod::SubdomainStrong)),
                Some(PageScore::Pattern) => return Some(DeptMatch::new(url.as_str(), MatchMethod::SubdomainPattern)),
                _ => {}
            }
            pause(self.config.delays.pattern_probe);
        }

        let base = trim_base(&university.url);
        for pattern in PATH_PATTERNS {
            let url = format!("{}{}", base, pattern);
            match self.probe_and_score(&url) {
                Some(PageScore::Strong) => return Some(DeptMatch::new(url, MatchMethod::PathStrong)),
                Some(PageScore::Pattern) => return Some(DeptMatch::new(url, MatchMethod::PathPattern)),
                _ => {}
            }
            pause(self.config.delays.pattern_probe);
        }

        None
    }

    /// Main-page links ordered by priority tier, document order within a tier
    pub fn candidate_links(&self, base_url: &str, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let mut ranked: Vec<_> = links(&document)
            .into_iter()
            .filter_map(|link| link_priority(&link).map(|p| (p, link)))
            .collect();
        ranked.sort_by_key(|(priority, _)| *priority);

        let mut candidates: Vec<String> = Vec::new();
        for (_, link) in ranked {
            let href = link.href.to_lowercase();
            if SKIP_PATTERNS.iter().any(|p| href.contains(p)) {
                continue;
            }
            if let Some(full_url) = resolve_url(base_url, &link.href) {
                if !candidates.contains(&full_url) {
                    candidates.push(full_url);
                }
            }
        }
        candidates
    }

    pub fn search_main_site(&self, university: &University) -> Option<DeptMatch> {
        let page = fetch_ok(self.fetcher, &university.url, self.config.timeouts.site_fetch())?;
        let candidates = self.candidate_links(&university.url, &page.body);

        // only links that answered count toward the cap
        let mut tested = 0;
        for url in &candidates {
            if tested >= MAX_SITE_CANDIDATES {
                break;
            }
            tracing::debug!(url = %url, "testing site link");
            let candidate = match self.fetcher.get(url, self.config.timeouts.link_probe()) {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "site link unreachable");
                    continue;
                }
            };
            tested += 1;

            if candidate.is_ok() && is_site_search_match(&PageText::parse(&candidate.body)) {
                return Some(DeptMatch::new(url.as_str(), MatchMethod::SiteSearch));
            }
            pause(self.config.delays.link_probe);
        }

        None
    }

    pub fn search_academic_sections(&self, university: &University) -> Option<DeptMatch> {
        let base = trim_base(&university.url);

        for section in ACADEMIC_SECTIONS {
            let section_url = format!("{}{}", base, section);
            if let Some(page) = fetch_ok(self.fetcher, &section_url, self.config.timeouts.section_probe()) {
                if let Some(found) = self.follow_statistics_links(&section_url, &page.body) {
                    return Some(found);
                }
            }
            pause(self.config.delays.section_probe);
        }

        None
    }

    fn follow_statistics_links(&self, section_url: &str, html: &str) -> Option<DeptMatch> {
        let document = Html::parse_document(html);
        let text = PageText::from_document(&document);
        if !(text.body.contains("statistics") || text.body.contains("statistical")) {
            return None;
        }

        for link in links(&document).iter().filter(|l| is_statistics_link(l)) {
            let Some(full_url) = resolve_url(section_url, &link.href) else {
                continue;
            };
            if let Some(candidate) = fetch_ok(self.fetcher, &full_url, self.config.timeouts.link_probe()) {
                if has_definitive_sign(&PageText::parse(&candidate.body)) {
                    return Some(DeptMatch::new(full_url, MatchMethod::TargetedSearch));
                }
            }
        }

        None
    }
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
    fn test_path_strong_match() {
        let fetcher = StaticFetcher::new()
            .page("https://www.b.edu/stats", "<title>Stats</title><p>Welcome to the Department of Statistics</p>");
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let mut uni = University::new("B University", "https://www.b.edu/", "Texas");

        assert!(verifier.verify(&mut uni));
        assert_eq!(uni.dept_url.as_deref(), Some("https://www.b.edu/stats"));
        assert_eq!(uni.has_stats_dept, Some(true));
        assert_eq!(uni.verification_method.as_deref(), Some("path_strong"));
        // the path list stops at the first match
        assert!(!fetcher.was_requested("https://www.b.edu/stat"));
    }

    #[test]
    fn test_subdomain_pattern_match() {
        let body = "<p>statistics, probability and data analysis for graduate research</p>";
        let fetcher = StaticFetcher::new().page("https://biostat.c.edu", body);
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let uni = University::new("C", "https://www.c.edu", "Iowa");

        let found = verifier.find_by_url_patterns(&uni).unwrap();
        assert_eq!(found.url, "https://biostat.c.edu");
        assert_eq!(found.method, MatchMethod::SubdomainPattern);
    }

    #[test]
    fn test_candidate_links_are_tiered_and_filtered() {
        let html = r#"
            <a href="/analytics">Analytics</a>
            <a href="/math">Math</a>
            <a href="/news/statistics">Statistics news</a>
            <a href="/sci">Statistical Sciences</a>
            <a href="/stat-dept">Department</a>
            <a href="/sci">Statistical Sciences again</a>
        "#;
        let fetcher = StaticFetcher::new();
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);

        let candidates = verifier.candidate_links("https://www.d.edu/", html);
        assert_eq!(
            candidates,
            vec![
                "https://www.d.edu/sci",
                "https://www.d.edu/math",
                "https://www.d.edu/stat-dept",
                "https://www.d.edu/analytics",
            ]
        );
    }

    #[test]
    fn test_site_search_fallback() {
        let main = r#"<a href="/academics/statistics-and-more">Statistics</a>"#;
        let dept = "<title>Dept</title><p>Welcome to the School of Statistics</p>";
        let fetcher = StaticFetcher::new()
            .page("https://www.e.edu", main)
            .page("https://www.e.edu/academics/statistics-and-more", dept);
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let mut uni = University::new("E", "https://www.e.edu", "Utah");

        assert!(verifier.verify(&mut uni));
        assert_eq!(uni.verification_method.as_deref(), Some("site_search"));
        assert_eq!(uni.dept_url.as_deref(), Some("https://www.e.edu/academics/statistics-and-more"));
    }

    fn statistics_links(count: usize) -> String {
        (0..count)
            .map(|i| format!(r#"<a href="/unit-{}">Statistics unit {}</a>"#, i, i))
            .collect()
    }

    #[test]
    fn test_site_search_skips_unreachable_links_without_spending_cap() {
        let dept = "<p>Welcome to the Department of Statistics</p>";
        // sixteen dead links ahead of the real department
        let fetcher = StaticFetcher::new()
            .page("https://www.h.edu", &statistics_links(17))
            .page("https://www.h.edu/unit-16", dept);
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let uni = University::new("H", "https://www.h.edu", "Iowa");

        let found = verifier.search_main_site(&uni).unwrap();
        assert_eq!(found.url, "https://www.h.edu/unit-16");
        assert_eq!(found.method, MatchMethod::SiteSearch);
    }

    #[test]
    fn test_site_search_caps_answered_links() {
        let dept = "<p>Welcome to the Department of Statistics</p>";
        let mut fetcher = StaticFetcher::new().page("https://www.k.edu", &statistics_links(16));
        for i in 0..15 {
            fetcher = fetcher.status(&format!("https://www.k.edu/unit-{}", i), 404);
        }
        let fetcher = fetcher.page("https://www.k.edu/unit-15", dept);
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let uni = University::new("K", "https://www.k.edu", "Iowa");

        assert_eq!(verifier.search_main_site(&uni), None);
        assert!(!fetcher.was_requested("https://www.k.edu/unit-15"));
    }

    #[test]
    fn test_targeted_search_fallback() {
        let index = r#"<p>Our statistics offerings</p><a href="/units/stat-sci">Statistics unit</a>"#;
        let dept = "<p>The statistics program trains researchers</p>";
        let fetcher = StaticFetcher::new()
            .page("https://www.f.edu/departments", index)
            .page("https://www.f.edu/units/stat-sci", dept);
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let mut uni = University::new("F", "https://www.f.edu", "Maine");

        assert!(verifier.verify(&mut uni));
        assert_eq!(uni.verification_method.as_deref(), Some("targeted_search"));
        assert_eq!(uni.dept_url.as_deref(), Some("https://www.f.edu/units/stat-sci"));
    }

    #[test]
    fn test_failure_is_tagged() {
        let fetcher = StaticFetcher::new();
        let config = config();
        let verifier = ExhaustiveVerifier::new(&fetcher, &config);
        let mut uni = University::new("G", "https://www.g.edu", "Idaho");

        assert!(!verifier.verify(&mut uni));
        assert!(uni.verified);
        assert_eq!(uni.has_stats_dept, Some(false));
        assert_eq!(uni.dept_url, None);
        assert_eq!(uni.verification_method.as_deref(), Some(FAILURE_TAG));
    }
}
