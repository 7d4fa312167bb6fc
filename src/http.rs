//! HTTP Fetch Module
//!
//! One pooled blocking client per run, with a browser-like User-Agent.
//! Crawl logic only sees the `Fetch` trait so it can also run against
//! `StaticFetcher`, an in-memory page map.

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::CrawlConfig;

/// A fetched page. `body` is only populated for successful responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub trait Fetch {
    fn get(&self, url: &str, timeout: Duration) -> Result<Page>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<Page> {
        let resp = self.client.get(url).timeout(timeout).send()?;
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();

        let body = if resp.status().is_success() {
            resp.text()?
        } else {
            String::new()
        };

        Ok(Page {
            url: final_url,
            status,
            body,
        })
    }
}

/// In-memory fetcher keyed by exact URL. Unknown URLs behave like a
/// connection failure. Every requested URL is recorded in order.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, (u16, String)>,
    requests: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 200 response
    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), (200, body.to_string()));
        self
    }

    /// Register a response with an arbitrary status
    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), (status, String::new()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn was_requested(&self, url: &str) -> bool {
        self.requests.borrow().iter().any(|u| u == url)
    }
}

impl Fetch for StaticFetcher {
    fn get(&self, url: &str, _timeout: Duration) -> Result<Page> {
        self.requests.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some((status, body)) => Ok(Page {
                url: url.to_string(),
                status: *status,
                body: if *status == 200 { body.clone() } else { String::new() },
            }),
            None => Err(anyhow!("connection refused: {}", url)),
        }
    }
}

/// Fetch `url` and keep it only on HTTP 200. Errors count as a miss.
pub fn fetch_ok(fetcher: &dyn Fetch, url: &str, timeout: Duration) -> Option<Page> {
    match fetcher.get(url, timeout) {
        Ok(page) if page.is_ok() => Some(page),
        Ok(page) => {
            tracing::debug!(url, status = page.status, "probe rejected");
            None
        }
        Err(e) => {
            tracing::debug!(url, error = %e, "probe failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_fetcher_records_requests() {
        let fetcher = StaticFetcher::new()
            .page("https://a.edu", "<html></html>")
            .status("https://a.edu/missing", 404);

        assert!(fetch_ok(&fetcher, "https://a.edu", Duration::from_secs(1)).is_some());
        assert!(fetch_ok(&fetcher, "https://a.edu/missing", Duration::from_secs(1)).is_none());
        assert!(fetch_ok(&fetcher, "https://b.edu", Duration::from_secs(1)).is_none());
        assert_eq!(
            fetcher.requests(),
            vec!["https://a.edu", "https://a.edu/missing", "https://b.edu"]
        );
    }

    #[test]
    fn test_non_200_success_is_rejected() {
        let fetcher = StaticFetcher::new().status("https://a.edu/empty", 204);
        assert!(fetch_ok(&fetcher, "https://a.edu/empty", Duration::from_secs(1)).is_none());
    }
}
