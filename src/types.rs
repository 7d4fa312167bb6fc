use serde::{Deserialize, Serialize};

/// One row of the graduate-student roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentRecord {
    pub name: String,
    pub program: String,
    pub office: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct University {
    pub name: String,
    pub url: String,
    pub state: String,
    /// None until a verifier has looked at the university
    #[serde(default)]
    pub has_stats_dept: Option<bool>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub dept_url: Option<String>,
    #[serde(default)]
    pub verification_method: Option<String>,
}

impl University {
    pub fn new(name: &str, url: &str, state: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            state: state.to_string(),
            has_stats_dept: None,
            verified: false,
            dept_url: None,
            verification_method: None,
        }
    }

    pub fn has_stats_dept(&self) -> bool {
        self.has_stats_dept == Some(true)
    }

    /// Record the outcome of a verifier run
    pub fn mark_verified(&mut self, found: Option<DeptMatch>, failure_tag: Option<&str>) {
        self.verified = true;
        match found {
            Some(m) => {
                self.has_stats_dept = Some(true);
                self.dept_url = Some(m.url);
                self.verification_method = Some(m.method.as_str().to_string());
            }
            None => {
                self.has_stats_dept = Some(false);
                self.dept_url = None;
                self.verification_method = failure_tag.map(|t| t.to_string());
            }
        }
    }
}

/// How a department URL was located; doubles as the confidence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    FastSubdomain,
    FastPath,
    SubdomainStrong,
    SubdomainPattern,
    PathStrong,
    PathPattern,
    SiteSearch,
    TargetedSearch,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::FastSubdomain => "fast_subdomain",
            MatchMethod::FastPath => "fast_path",
            MatchMethod::SubdomainStrong => "subdomain_strong",
            MatchMethod::SubdomainPattern => "subdomain_pattern",
            MatchMethod::PathStrong => "path_strong",
            MatchMethod::PathPattern => "path_pattern",
            MatchMethod::SiteSearch => "site_search",
            MatchMethod::TargetedSearch => "targeted_search",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeptMatch {
    pub url: String,
    pub method: MatchMethod,
}

impl DeptMatch {
    pub fn new(url: impl Into<String>, method: MatchMethod) -> Self {
        Self { url: url.into(), method }
    }
}

/// Requirement fields extracted from a single page
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PageRequirements {
    pub url: String,
    pub gre_required: Option<bool>,
    pub gpa_requirement: Option<f64>,
    pub prerequisites: Vec<String>,
    pub application_deadline: Option<String>,
    pub research_areas: Vec<String>,
    pub duration: Option<String>,
    pub funding_info: Vec<String>,
    pub raw_requirements: Option<String>,
}

/// Requirement fields merged across every page found for one university
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CombinedRequirements {
    pub gre_required: Option<bool>,
    pub gpa_requirement: Option<f64>,
    pub prerequisites: Vec<String>,
    pub application_deadline: Option<String>,
    pub research_areas: Vec<String>,
    pub duration: Option<String>,
    pub funding_info: Vec<String>,
    pub source_urls: Vec<String>,
    pub raw_requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProgramRequirements {
    pub university: String,
    pub state: String,
    pub university_url: String,
    pub dept_url: String,
    pub requirements: CombinedRequirements,
    pub last_updated: String,
}
