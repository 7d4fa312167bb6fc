//! Plain-text Reports
//!
//! Every report groups universities under their state. A state heading is
//! the state name followed by a `-` rule of the same length, and entries are
//! bullet-prefixed. States are sorted; entries keep their input order.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::{ProgramRequirements, University};

const STATS_LIST_TITLE: &str = "US UNIVERSITIES WITH VERIFIED STATISTICS DEPARTMENTS";
const REQUIREMENTS_TITLE: &str = "PhD STATISTICS PROGRAM REQUIREMENTS SUMMARY";

/// Group records by state, sorted by state name, input order within a state
pub fn group_by_state<'a, I>(universities: I) -> BTreeMap<&'a str, Vec<&'a University>>
where
    I: IntoIterator<Item = &'a University>,
{
    let mut by_state: BTreeMap<&str, Vec<&University>> = BTreeMap::new();
    for uni in universities {
        by_state.entry(uni.state.as_str()).or_default().push(uni);
    }
    by_state
}

fn state_heading(out: &mut String, state: &str) {
    let _ = writeln!(out, "{}:", state);
    let _ = writeln!(out, "{}", "-".repeat(state.chars().count()));
}

fn dept_url_or_none(uni: &University) -> &str {
    uni.dept_url.as_deref().unwrap_or("None")
}

fn university_entry(out: &mut String, uni: &University, suffix: &str) {
    let _ = writeln!(out, "  • {}{}", uni.name, suffix);
    let _ = writeln!(out, "    University: {}", uni.url);
    let _ = writeln!(out, "    Statistics Dept: {}", dept_url_or_none(uni));
    out.push('\n');
}

/// The state-grouped list of universities with a statistics department
pub fn render_stats_list(stats_only: &[University]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", STATS_LIST_TITLE);
    let _ = writeln!(out, "{}\n", "=".repeat(60));

    for (state, unis) in group_by_state(stats_only) {
        state_heading(&mut out, state);
        for uni in unis {
            university_entry(&mut out, uni, "");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "TOTAL: {} universities with statistics departments", stats_only.len());
    out
}

/// Console listing of found departments after a fast run
pub fn render_detailed_results(results: &[University]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(80));
    let _ = writeln!(out, "DETAILED RESULTS - UNIVERSITIES WITH STATISTICS DEPARTMENTS");
    let _ = writeln!(out, "{}", "=".repeat(80));

    for (state, unis) in group_by_state(results.iter().filter(|u| u.has_stats_dept())) {
        out.push('\n');
        state_heading(&mut out, state);
        for uni in unis {
            university_entry(&mut out, uni, "");
        }
    }
    out
}

/// Console report after an exhaustive run: found, not found, and totals
pub fn render_verification_results(universities: &[University]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "US UNIVERSITIES - STATISTICS DEPARTMENT VERIFICATION RESULTS");
    let _ = writeln!(out, "{}", rule);

    let verified_count = universities.iter().filter(|u| u.verified).count();
    let has_stats_count = universities.iter().filter(|u| u.has_stats_dept()).count();

    for (state, unis) in group_by_state(universities.iter().filter(|u| u.has_stats_dept())) {
        out.push('\n');
        state_heading(&mut out, state);
        for uni in unis {
            university_entry(&mut out, uni, " - ✅ VERIFIED");
        }
    }

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "UNIVERSITIES WHERE NO STATISTICS DEPARTMENT WAS FOUND:");
    let _ = writeln!(out, "{}", rule);

    let not_found = universities.iter().filter(|u| u.verified && !u.has_stats_dept());
    let mut no_stats_count = 0;
    for (state, unis) in group_by_state(not_found) {
        out.push('\n');
        state_heading(&mut out, state);
        for uni in unis {
            let _ = writeln!(out, "  • {} - ❌ No Statistics Department Found", uni.name);
            no_stats_count += 1;
        }
    }

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "Total universities checked: {}", verified_count);
    let _ = writeln!(out, "Universities WITH Statistics Departments: {}", has_stats_count);
    let _ = writeln!(out, "Universities WITHOUT Statistics Departments: {}", no_stats_count);
    if verified_count > 0 {
        let rate = has_stats_count as f64 / verified_count as f64 * 100.0;
        let _ = writeln!(out, "Success rate: {:.1}%", rate);
    } else {
        let _ = writeln!(out, "0%");
    }
    let _ = writeln!(out, "{}", rule);
    out
}

/// Human-readable summary of scraped PhD requirements
pub fn render_requirements_summary(results: &[ProgramRequirements]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);
    let _ = writeln!(out, "{}", REQUIREMENTS_TITLE);
    let _ = writeln!(out, "{}\n", rule);

    for result in results {
        let reqs = &result.requirements;
        let _ = writeln!(out, "{} ({})", result.university, result.state);
        let _ = writeln!(out, "{}", "-".repeat(result.university.chars().count()));
        let _ = writeln!(out, "Department URL: {}", result.dept_url);

        if let Some(gre) = reqs.gre_required {
            let status = if gre { "Required" } else { "Not Required/Optional" };
            let _ = writeln!(out, "GRE: {}", status);
        }
        if let Some(gpa) = reqs.gpa_requirement {
            let _ = writeln!(out, "Minimum GPA: {:?}", gpa);
        }
        if let Some(duration) = &reqs.duration {
            let _ = writeln!(out, "Program Duration: {}", duration);
        }
        if let Some(deadline) = &reqs.application_deadline {
            let _ = writeln!(out, "Application Deadline: {}", deadline);
        }
        if !reqs.prerequisites.is_empty() {
            let _ = writeln!(out, "Prerequisites/Background:");
            for prereq in reqs.prerequisites.iter().take(3) {
                let _ = writeln!(out, "  • {}", prereq);
            }
        }
        if !reqs.research_areas.is_empty() {
            let _ = writeln!(out, "Research Areas: {}", reqs.research_areas.join(", "));
        }
        if !reqs.funding_info.is_empty() {
            let _ = writeln!(out, "Funding Information:");
            for funding in reqs.funding_info.iter().take(2) {
                let _ = writeln!(out, "  • {}", funding);
            }
        }

        let _ = writeln!(out, "\nSource URLs: {}", reqs.source_urls.join(", "));
        let _ = writeln!(out, "\n{}\n", rule);
    }

    out
}
