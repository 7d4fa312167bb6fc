use std::fs;
use std::path::Path;
use anyhow::{Result, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::University;

pub const UNIVERSITY_LIST: &str = "known_US_universities.txt";
pub const VERIFIED_RESULTS: &str = "verified_statistics_departments.json";
pub const STATS_ONLY_RESULTS: &str = "universities_with_statistics_only.json";
pub const STATS_LIST_REPORT: &str = "statistics_departments_list.txt";
pub const EXHAUSTIVE_RESULTS: &str = "us_universities_with_statistics.json";
pub const REQUIREMENTS_RESULTS: &str = "phd_statistics_requirements.json";
pub const REQUIREMENTS_REPORT: &str = "phd_requirements_summary.txt";
pub const STUDENTS_CSV: &str = "students.csv";

/// Parse `name|url|state` lines; blank or short lines are skipped
pub fn parse_university_list(content: &str) -> Vec<University> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains('|'))
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').map(str::trim).collect();
            if parts.len() >= 3 {
                Some(University::new(parts[0], parts[1], parts[2]))
            } else {
                tracing::warn!(line, "skipping malformed university line");
                None
            }
        })
        .collect()
}

pub fn load_university_list(path: &Path) -> Result<Vec<University>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read university list from {:?}", path))?;

    let universities = parse_university_list(&content);
    println!("Loaded {} universities from {:?}", universities.len(), path);

    Ok(universities)
}

/// Read any JSON array of records
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;

    let records: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON array in {:?}", path))?;

    Ok(records)
}

/// Write records as a pretty-printed JSON array with a trailing newline
pub fn save_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }

    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    fs::write(path, json)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

pub fn save_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_university_list() {
        let content = "Purdue University | https://www.purdue.edu | Indiana\n\
                       \n\
                       no pipes here\n\
                       Broken|https://broken.edu\n\
                       Rice University|https://www.rice.edu|Texas|extra\n";
        let universities = parse_university_list(content);
        assert_eq!(universities.len(), 2);
        assert_eq!(universities[0].name, "Purdue University");
        assert_eq!(universities[0].url, "https://www.purdue.edu");
        assert_eq!(universities[0].state, "Indiana");
        assert_eq!(universities[0].has_stats_dept, None);
        assert!(!universities[0].verified);
        assert_eq!(universities[1].state, "Texas");
    }

    #[test]
    fn test_load_missing_list_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_university_list(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_json_keeps_tri_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/universities.json");
        let mut found = University::new("A", "https://a.edu", "Ohio");
        found.has_stats_dept = Some(true);
        let unknown = University::new("B", "https://b.edu", "Ohio");

        save_json(&path, &[found.clone(), unknown.clone()]).unwrap();
        let loaded: Vec<University> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![found, unknown]);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"has_stats_dept\": null"));
    }

    #[test]
    fn test_load_json_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"[{"name": "A", "url": "https://a.edu", "state": "Ohio"}]"#).unwrap();
        let loaded: Vec<University> = load_json(&path).unwrap();
        assert_eq!(loaded[0].has_stats_dept, None);
        assert_eq!(loaded[0].dept_url, None);
    }
}
