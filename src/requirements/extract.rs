//! Regex Extraction of PhD Requirement Fields
//!
//! Every field is searched in the lower-cased full page text:
//! - GRE: first matching pattern decides required vs. optional/waived
//! - GPA: first capture per pattern, kept only inside [2.0, 4.0]
//! - Duration: first capture per pattern, kept only inside [3, 8] years
//! - Prerequisites / funding: keyword sentences, capped
//! - Deadline: first date-shaped phrase near "deadline"/"due"
//! - Research areas: keyword presence

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::CrawlConfig;
use crate::html::{document_text, element_text, next_element_siblings, truncate_chars};
use crate::http::{fetch_ok, Fetch};
use crate::types::PageRequirements;

const GRE_PATTERNS: [&str; 4] = [
    r"gre.*(?:required|not required|optional)",
    r"graduate record exam.*(?:required|not required|optional)",
    r"(?:requires?|need|must have).*gre",
    r"gre.*(?:waived|waiver)",
];

const GRE_NOT_REQUIRED: [&str; 4] = ["not required", "optional", "waived", "waiver"];

const GPA_PATTERNS: [&str; 4] = [
    r"gpa.*?(\d+\.?\d*)",
    r"grade point average.*?(\d+\.?\d*)",
    r"minimum.*?gpa.*?(\d+\.?\d*)",
    r"(\d+\.?\d*).*?gpa.*?(?:required|minimum)",
];

const PREREQ_KEYWORDS: [&str; 11] = [
    "prerequisite",
    "background",
    "preparation",
    "coursework",
    "mathematics",
    "calculus",
    "linear algebra",
    "statistics",
    "probability",
    "programming",
    "computer science",
];

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december";

const RESEARCH_KEYWORDS: [&str; 10] = [
    "research areas",
    "research interests",
    "specializations",
    "biostatistics",
    "machine learning",
    "data science",
    "bayesian",
    "computational",
    "theoretical",
    "applied statistics",
];

const DURATION_PATTERNS: [&str; 3] = [
    r"(\d+)\s*(?:year|yr)s?\s*(?:program|degree)",
    r"(?:program|degree).*?(\d+)\s*(?:year|yr)s?",
    r"typically.*?(\d+)\s*(?:year|yr)s?",
];

const FUNDING_KEYWORDS: [&str; 7] = [
    "funding",
    "assistantship",
    "fellowship",
    "scholarship",
    "tuition waiver",
    "stipend",
    "financial support",
];

const REQUIREMENT_HEADINGS: [&str; 6] = [
    "admission requirements",
    "application requirements",
    "prerequisites",
    "requirements",
    "how to apply",
    "application process",
];

pub const MAX_PREREQUISITES: usize = 5;
pub const MAX_FUNDING: usize = 3;
const MATCHES_PER_KEYWORD: usize = 2;
const SNIPPET_BLOCKS: usize = 3;
const SNIPPET_CHARS: usize = 500;

/// Fetch a candidate page and extract its fields; None unless HTTP 200
pub fn extract_requirements(fetcher: &dyn Fetch, config: &CrawlConfig, url: &str) -> Option<PageRequirements> {
    let page = fetch_ok(fetcher, url, config.timeouts.page_fetch())?;
    Some(extract_from_html(url, &page.body))
}

pub fn extract_from_html(url: &str, html: &str) -> PageRequirements {
    let document = Html::parse_document(html);
    let text = document_text(&document).to_lowercase();

    PageRequirements {
        url: url.to_string(),
        gre_required: extract_gre(&text),
        gpa_requirement: extract_gpa(&text),
        prerequisites: extract_prerequisites(&text),
        application_deadline: extract_deadline(&text),
        research_areas: extract_research_areas(&text),
        duration: extract_duration(&text),
        funding_info: extract_funding(&text),
        raw_requirements: find_requirements_section(&document).map(|s| truncate_chars(&s, SNIPPET_CHARS)),
    }
}

/// Tri-state: None when no GRE phrase is found at all
pub fn extract_gre(text: &str) -> Option<bool> {
    for pattern in GRE_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(m) = re.find(text) {
                let waived = GRE_NOT_REQUIRED.iter().any(|w| m.as_str().contains(w));
                return Some(!waived);
            }
        }
    }
    None
}

pub fn extract_gpa(text: &str) -> Option<f64> {
    for pattern in GPA_PATTERNS {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        let Some(caps) = re.captures(text) else {
            continue;
        };
        if let Ok(gpa) = caps[1].parse::<f64>() {
            if (2.0..=4.0).contains(&gpa) {
                return Some(gpa);
            }
        }
    }
    None
}

/// Up to two `keyword ... .` sentences per keyword, five overall
pub fn extract_prerequisites(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for keyword in PREREQ_KEYWORDS {
        if let Ok(re) = Regex::new(&format!(r"{}[^.]*\.", regex::escape(keyword))) {
            found.extend(
                re.find_iter(text)
                    .take(MATCHES_PER_KEYWORD)
                    .map(|m| m.as_str().to_string()),
            );
        }
    }
    found.truncate(MAX_PREREQUISITES);
    found
}

pub fn extract_deadline(text: &str) -> Option<String> {
    let patterns = [
        format!(r"(?:deadline|due|apply by).*?(?:{})\s+\d{{1,2}}", MONTHS),
        format!(r"(?:{})\s+\d{{1,2}}.*?(?:deadline|due)", MONTHS),
        r"\d{1,2}/\d{1,2}/\d{4}.*?(?:deadline|due)".to_string(),
        r"(?:deadline|due).*?\d{1,2}/\d{1,2}/\d{4}".to_string(),
    ];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(m) = re.find(text) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}

pub fn extract_research_areas(text: &str) -> Vec<String> {
    RESEARCH_KEYWORDS
        .iter()
        .filter(|k| text.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

pub fn extract_duration(text: &str) -> Option<String> {
    for pattern in DURATION_PATTERNS {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        let Some(caps) = re.captures(text) else {
            continue;
        };
        if let Ok(years) = caps[1].parse::<u32>() {
            if (3..=8).contains(&years) {
                return Some(format!("{} years", years));
            }
        }
    }
    None
}

/// Sentences mentioning funding keywords, two per keyword, three overall
pub fn extract_funding(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for keyword in FUNDING_KEYWORDS {
        if !text.contains(keyword) {
            continue;
        }
        if let Ok(re) = Regex::new(&format!(r"(?i)[^.]*{}[^.]*\.", regex::escape(keyword))) {
            found.extend(
                re.find_iter(text)
                    .take(MATCHES_PER_KEYWORD)
                    .map(|m| m.as_str().to_string()),
            );
        }
    }
    found.truncate(MAX_FUNDING);
    found
}

/// Text of the blocks following the first requirements-like heading
pub fn find_requirements_section(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1, h2, h3, h4").ok()?;

    for heading in document.select(&selector) {
        let heading_text = element_text(&heading).to_lowercase();
        if !REQUIREMENT_HEADINGS.iter().any(|h| heading_text.contains(h)) {
            continue;
        }

        let mut content = Vec::new();
        for sibling in next_element_siblings(&heading) {
            if content.len() >= SNIPPET_BLOCKS {
                break;
            }
            if matches!(sibling.value().name(), "p" | "ul" | "ol" | "div") {
                let text = element_text(&sibling).trim().to_string();
                if !text.is_empty() {
                    content.push(text);
                }
            }
        }

        if !content.is_empty() {
            return Some(content.join(" "));
        }
    }

    None
}
