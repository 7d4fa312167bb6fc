//! Crawl Configuration Module
//!
//! Timeouts, etiquette pauses and the User-Agent shared by every tool.
//! Values come from `config/crawler.yml` under `ROOT` when present,
//! otherwise the built-in defaults apply. Every YAML key is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config/crawler.yml";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub user_agent: String,
    pub max_redirects: usize,
    pub timeouts: Timeouts,
    pub delays: Delays,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            timeouts: Timeouts::default(),
            delays: Delays::default(),
        }
    }
}

/// Per-request timeouts in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Timeouts {
    pub quick_probe: u64,
    pub pattern_probe: u64,
    pub link_probe: u64,
    pub section_probe: u64,
    pub page_fetch: u64,
    pub site_fetch: u64,
    pub student_page: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            quick_probe: 3,
            pattern_probe: 5,
            link_probe: 8,
            section_probe: 10,
            page_fetch: 10,
            site_fetch: 15,
            student_page: 30,
        }
    }
}

impl Timeouts {
    pub fn quick_probe(&self) -> Duration {
        Duration::from_secs(self.quick_probe)
    }

    pub fn pattern_probe(&self) -> Duration {
        Duration::from_secs(self.pattern_probe)
    }

    pub fn link_probe(&self) -> Duration {
        Duration::from_secs(self.link_probe)
    }

    pub fn section_probe(&self) -> Duration {
        Duration::from_secs(self.section_probe)
    }

    pub fn page_fetch(&self) -> Duration {
        Duration::from_secs(self.page_fetch)
    }

    pub fn site_fetch(&self) -> Duration {
        Duration::from_secs(self.site_fetch)
    }

    pub fn student_page(&self) -> Duration {
        Duration::from_secs(self.student_page)
    }
}

/// Fixed pauses between requests, in milliseconds
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Delays {
    pub quick_probe: u64,
    pub between_fast: u64,
    pub pattern_probe: u64,
    pub link_probe: u64,
    pub section_probe: u64,
    pub between_exhaustive: u64,
    pub phd_probe: u64,
    pub between_requirements: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            quick_probe: 50,
            between_fast: 100,
            pattern_probe: 300,
            link_probe: 200,
            section_probe: 500,
            between_exhaustive: 500,
            phd_probe: 200,
            between_requirements: 1000,
        }
    }
}

impl Delays {
    /// No pauses at all; for offline runs against a static fetcher
    pub fn none() -> Self {
        Self {
            quick_probe: 0,
            between_fast: 0,
            pattern_probe: 0,
            link_probe: 0,
            section_probe: 0,
            between_exhaustive: 0,
            phd_probe: 0,
            between_requirements: 0,
        }
    }
}

/// Sleep for `millis`; zero is a no-op
pub fn pause(millis: u64) {
    if millis > 0 {
        std::thread::sleep(Duration::from_millis(millis));
    }
}

/// Resolve the config path: explicit flag first, then `ROOT/config/crawler.yml`
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(root).join(CONFIG_FILE)
        }
    }
}

/// Load the crawl config, falling back to defaults when the file is absent
pub fn load_config(explicit: Option<&Path>) -> Result<CrawlConfig> {
    let path = config_path(explicit);

    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("Config file {:?} does not exist", path);
        }
        return Ok(CrawlConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read crawl config from {:?}", path))?;

    parse_config(&content).with_context(|| format!("Failed to parse crawl config {:?}", path))
}

pub fn parse_config(yaml: &str) -> Result<CrawlConfig> {
    if yaml.trim().is_empty() {
        return Ok(CrawlConfig::default());
    }
    let config: CrawlConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "timeouts:\n  quick_probe: 7\ndelays:\n  between_requirements: 0\n";
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.timeouts.quick_probe, 7);
        assert_eq!(config.timeouts.site_fetch, 15);
        assert_eq!(config.delays.between_requirements, 0);
        assert_eq!(config.delays.pattern_probe, 300);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.timeouts.quick_probe(), Duration::from_secs(3));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawler.yml");
        fs::write(&path, "user_agent: test-agent\nmax_redirects: 2\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.max_redirects, 2);
    }
}
