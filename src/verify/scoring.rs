//! Keyword scoring used to decide whether a fetched page belongs to a
//! statistics department.

use crate::html::{Link, PageText};

/// Phrases that identify a department page on their own
pub const STRONG_INDICATORS: [&str; 10] = [
    "department of statistics",
    "statistics department",
    "statistical science department",
    "phd in statistics",
    "doctorate in statistics",
    "graduate program in statistics",
    "master of statistics",
    "ms in statistics",
    "statistics faculty",
    "statistics research",
];

pub const STATS_TERMS: [&str; 7] = [
    "statistics",
    "statistical",
    "statistician",
    "probability",
    "data analysis",
    "biostatistics",
    "econometrics",
];

pub const ACADEMIC_TERMS: [&str; 8] = [
    "phd",
    "graduate",
    "faculty",
    "research",
    "degree",
    "program",
    "course",
    "curriculum",
];

/// Strong indicators checked on pages reached through site links
pub const SITE_SEARCH_INDICATORS: [&str; 8] = [
    "department of statistics",
    "statistics department",
    "statistical science department",
    "school of statistics",
    "phd in statistics",
    "graduate program in statistics",
    "ms in statistics",
    "statistics faculty",
];

const SITE_SEARCH_ACADEMIC: [&str; 5] = ["graduate", "phd", "faculty", "research", "program"];

/// Signs checked on pages reached from an academic section index
pub const DEFINITIVE_SIGNS: [&str; 7] = [
    "department of statistics",
    "statistics department",
    "statistics faculty",
    "phd statistics",
    "graduate statistics",
    "statistics program",
    "statistical science",
];

const LINK_KEYWORDS: [&str; 9] = [
    "statistic",
    "math",
    "data science",
    "biostat",
    "probability",
    "analytics",
    "quantitative",
    "computational",
    "applied math",
];

const MIN_STATS_TERMS: usize = 3;
const MIN_ACADEMIC_TERMS: usize = 2;
const MIN_STATS_MENTIONS: usize = 5;

/// Outcome of scoring a probed page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScore {
    Strong,
    Pattern,
    NoMatch,
}

fn count_present(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| text.contains(*t)).count()
}

/// Score a pattern-probed page: strong phrase, else the dual keyword threshold
pub fn score_department_page(page: &PageText) -> PageScore {
    if page.mentions_any(&STRONG_INDICATORS) {
        return PageScore::Strong;
    }

    let stats_count = count_present(&page.body, &STATS_TERMS);
    let academic_count = count_present(&page.body, &ACADEMIC_TERMS);

    if stats_count >= MIN_STATS_TERMS && academic_count >= MIN_ACADEMIC_TERMS {
        PageScore::Pattern
    } else {
        PageScore::NoMatch
    }
}

/// Acceptance rule for candidates found by crawling the main site
pub fn is_site_search_match(page: &PageText) -> bool {
    if page.mentions_any(&SITE_SEARCH_INDICATORS) {
        return true;
    }

    let body = &page.body;
    if body.contains("statistics") && SITE_SEARCH_ACADEMIC.iter().any(|t| body.contains(t)) {
        let mentions = body.matches("statistics").count() + body.matches("statistical").count();
        return mentions >= MIN_STATS_MENTIONS;
    }

    false
}

pub fn has_definitive_sign(page: &PageText) -> bool {
    DEFINITIVE_SIGNS.iter().any(|s| page.body.contains(s))
}

/// Ordering tier for outbound links; lower sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LinkPriority {
    High,
    Medium,
    Low,
}

/// Classify a main-site link, or None if it shows no statistics flavour
pub fn link_priority(link: &Link) -> Option<LinkPriority> {
    let href = link.href.to_lowercase();
    let text = link.text.to_lowercase();
    let title = link.title.to_lowercase();

    if text.contains("statistics") || text.contains("statistical") {
        Some(LinkPriority::High)
    } else if href.contains("stat") || href.contains("math") {
        Some(LinkPriority::Medium)
    } else if LINK_KEYWORDS
        .iter()
        .any(|k| href.contains(k) || text.contains(k) || title.contains(k))
    {
        Some(LinkPriority::Low)
    } else {
        None
    }
}

/// Link filter used on academic section index pages
pub fn is_statistics_link(link: &Link) -> bool {
    let href = link.href.to_lowercase();
    let text = link.text.to_lowercase();
    text.contains("statistic") || href.contains("statistic") || (text.contains("math") && href.contains("stat"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, body: &str) -> PageText {
        PageText {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn link(href: &str, text: &str) -> Link {
        Link {
            href: href.to_string(),
            text: text.to_string(),
            title: String::new(),
        }
    }

    #[test]
    fn test_strong_indicator_in_title() {
        assert_eq!(score_department_page(&page("department of statistics", "")), PageScore::Strong);
    }

    #[test]
    fn test_dual_threshold() {
        let body = "statistics and probability with data analysis. graduate research.";
        assert_eq!(score_department_page(&page("", body)), PageScore::Pattern);

        // three stats terms but only one academic term
        let body = "statistics and probability with data analysis. research.";
        assert_eq!(score_department_page(&page("", body)), PageScore::NoMatch);

        // plenty of academic terms but only two stats terms
        let body = "statistics probability phd graduate faculty";
        assert_eq!(score_department_page(&page("", body)), PageScore::NoMatch);
    }

    #[test]
    fn test_site_search_mention_count() {
        let four = page("", "statistics statistics statistical statistics graduate");
        assert!(!is_site_search_match(&four));
        let five = page("", "statistics statistics statistical statistics statistical graduate");
        assert!(is_site_search_match(&five));
        assert!(is_site_search_match(&page("school of statistics", "")));
    }

    #[test]
    fn test_link_priority() {
        assert_eq!(link_priority(&link("/x", "Department of Statistics")), Some(LinkPriority::High));
        assert_eq!(link_priority(&link("/Math-Dept", "Sciences")), Some(LinkPriority::Medium));
        assert_eq!(link_priority(&link("/analytics", "Analytics")), Some(LinkPriority::Low));
        assert_eq!(link_priority(&link("/news", "News")), None);
    }

    #[test]
    fn test_statistics_link() {
        assert!(is_statistics_link(&link("/stats", "Mathematics")));
        assert!(is_statistics_link(&link("/depts/statistics", "Dept")));
        assert!(!is_statistics_link(&link("/math", "Mathematics")));
    }

    #[test]
    fn test_script_text_does_not_score() {
        let page = PageText::parse(r#"<script>trackEvent("department of statistics")</script><p>Campus map</p>"#);
        assert_eq!(score_department_page(&page), PageScore::NoMatch);
        assert!(!is_site_search_match(&page));
        assert!(!has_definitive_sign(&page));
    }
}
