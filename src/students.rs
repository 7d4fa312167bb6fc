//! Student Roster Extraction Module
//!
//! Reads a department's graduate-student page. Every `h2`/`h3` that looks
//! like a person's name starts a record; email, program and office are
//! inferred from the elements that follow it.

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::time::Duration;

use crate::html::{element_text, next_element_siblings, stripped_text};
use crate::http::Fetch;
use crate::types::StudentRecord;

pub const DEFAULT_STUDENT_PAGE: &str = "https://www.stat.purdue.edu/people/graduate_students/index.html";

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

/// Headings that introduce a section rather than a student
const SECTION_TITLES: [&str; 3] = ["graduate students", "students", "current students"];

const EMAIL_SEARCH_DEPTH: usize = 10;

/// Fetch the roster page and extract students. Any failure yields an empty list.
pub fn fetch_students(fetcher: &dyn Fetch, url: &str, timeout: Duration) -> Vec<StudentRecord> {
    match fetcher.get(url, timeout) {
        Ok(page) if page.status >= 200 && page.status < 300 => parse_students(&page.body),
        Ok(page) => {
            tracing::warn!(url, status = page.status, "error fetching roster page");
            vec![]
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "error fetching roster page");
            vec![]
        }
    }
}

/// Extract one record per name-like heading
pub fn parse_students(html: &str) -> Vec<StudentRecord> {
    let document = Html::parse_document(html);
    let mut students = Vec::new();

    let email_re = match Regex::new(EMAIL_PATTERN) {
        Ok(re) => re,
        Err(_) => return students,
    };
    let (Ok(heading_sel), Ok(mailto_sel)) = (Selector::parse("h2, h3"), Selector::parse("a[href^='mailto:']")) else {
        return students;
    };

    let mailto_count = document.select(&mailto_sel).count();
    tracing::info!(mailto_count, "found email links");

    for heading in document.select(&heading_sel) {
        let name = stripped_text(&heading);
        if !looks_like_student_name(&name) {
            continue;
        }

        let email = find_email(&heading, &email_re, &mailto_sel);
        let (program, office) = find_program_and_office(&heading);

        students.push(StudentRecord {
            name,
            program,
            office,
            email,
        });
    }

    students
}

fn looks_like_student_name(name: &str) -> bool {
    if name.is_empty() || name.split_whitespace().count() < 2 {
        return false;
    }
    let lower = name.to_lowercase();
    if SECTION_TITLES.contains(&lower.as_str()) {
        return false;
    }
    !(name.starts_with("Current") || name.starts_with("Graduate"))
}

fn mailto_address(element: &ElementRef, mailto_sel: &Selector) -> Option<String> {
    element
        .select(mailto_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.replacen("mailto:", "", 1))
}

/// The heading itself, then up to nine following siblings; the parent's
/// first mailto link is the last resort.
fn find_email(heading: &ElementRef, email_re: &Regex, mailto_sel: &Selector) -> String {
    let candidates = std::iter::once(*heading).chain(next_element_siblings(heading));

    for element in candidates.take(EMAIL_SEARCH_DEPTH) {
        if let Some(address) = mailto_address(&element, mailto_sel) {
            return address;
        }
        if let Some(m) = email_re.find(&element_text(&element)) {
            return m.as_str().to_string();
        }
    }

    heading
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| mailto_address(&parent, mailto_sel))
        .unwrap_or_default()
}

fn find_program_and_office(heading: &ElementRef) -> (String, String) {
    let mut program = String::new();
    let mut office = String::new();

    for sibling in next_element_siblings(heading) {
        if !matches!(sibling.value().name(), "p" | "div" | "span") {
            break;
        }
        let text = stripped_text(&sibling);

        if text.contains("Ph.D") || text.contains("PhD") {
            program = "PhD".to_string();
        } else if text.contains("M.S") || text.contains("MS") || text.contains("Master") {
            program = "MS".to_string();
        } else if text.contains("Office") {
            let cleaned = text.replace("Office:", "");
            let cleaned = cleaned.trim();
            office = match cleaned.split_once("Email:") {
                Some((before, _)) => before.trim().to_string(),
                None => cleaned.to_string(),
            };
        }
    }

    (program, office)
}

/// Write the roster as `Name,Program,Office,Email`
pub fn write_students_csv(path: &Path, students: &[StudentRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create student CSV at {:?}", path))?;

    writer.write_record(["Name", "Program", "Office", "Email"])?;
    for student in students {
        writer.write_record([
            student.name.as_str(),
            student.program.as_str(),
            student.office.as_str(),
            student.email.as_str(),
        ])?;
    }
    writer.flush()
        .with_context(|| format!("Failed to write student CSV at {:?}", path))?;
    Ok(())
}
