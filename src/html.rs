//! HTML helpers shared by the crawlers: page text, titles, links,
//! sibling walking and URL resolution.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// An anchor with its raw href, trimmed text and `title` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub title: String,
}

/// Lower-cased title and body text of a document, parsed once.
#[derive(Debug, Clone)]
pub struct PageText {
    pub title: String,
    pub body: String,
}

impl PageText {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::from_document(&document)
    }

    pub fn from_document(document: &Html) -> Self {
        Self {
            title: page_title(document).to_lowercase(),
            body: document_text(document).to_lowercase(),
        }
    }

    /// True if any phrase appears in the title or the body
    pub fn mentions_any(&self, phrases: &[&str]) -> bool {
        phrases
            .iter()
            .any(|p| self.title.contains(p) || self.body.contains(p))
    }
}

/// Text of the first `<title>`, or empty
pub fn page_title(document: &Html) -> String {
    if let Ok(selector) = Selector::parse("title") {
        if let Some(title) = document.select(&selector).next() {
            return title.text().collect();
        }
    }
    String::new()
}

/// Elements whose text is never rendered as page content
const NON_CONTENT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Text nodes under `element`, skipping anything inside script, style,
/// noscript or template elements
pub fn visible_text<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|e| NON_CONTENT_ELEMENTS.contains(&e.value().name()));
        if hidden {
            None
        } else {
            Some(&**text)
        }
    })
}

/// Every visible text node of the document concatenated without separators
pub fn document_text(document: &Html) -> String {
    visible_text(&document.root_element()).collect()
}

/// Concatenated visible text of an element
pub fn element_text(element: &ElementRef) -> String {
    visible_text(element).collect()
}

/// Text fragments trimmed individually and joined by single spaces
pub fn stripped_text(element: &ElementRef) -> String {
    visible_text(element)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn links(document: &Html) -> Vec<Link> {
    let mut out = Vec::new();
    if let Ok(selector) = Selector::parse("a[href]") {
        for a in document.select(&selector) {
            let href = a.value().attr("href").unwrap_or_default().trim().to_string();
            out.push(Link {
                href,
                text: element_text(&a).trim().to_string(),
                title: a.value().attr("title").unwrap_or_default().to_string(),
            });
        }
    }
    out
}

/// Element siblings following `element`, skipping text and comment nodes
pub fn next_element_siblings<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Resolve `href` against `base`; None for hrefs that cannot form a URL
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base).ok()?;
    let joined = base.join(href).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}

/// The last two labels of the host, e.g. `purdue.edu` for `www.purdue.edu`
pub fn registered_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return None;
    }
    Some(labels[labels.len() - 2..].join("."))
}

/// `base` without trailing slashes, ready for path concatenation
pub fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Keep the first `max` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
