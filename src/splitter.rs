//! Result Splitter
//!
//! Pure post-processing of a verification JSON file: keep universities that
//! have a statistics department, write them as JSON, and write the
//! state-grouped text list. Output is deterministic for a given input.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::report::render_stats_list;
use crate::storage::{load_json, save_json, save_text, STATS_LIST_REPORT, STATS_ONLY_RESULTS};
use crate::types::University;

/// Paths written by a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutputs {
    pub stats_json: PathBuf,
    pub stats_report: PathBuf,
}

impl SplitOutputs {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            stats_json: dir.join(STATS_ONLY_RESULTS),
            stats_report: dir.join(STATS_LIST_REPORT),
        }
    }
}

/// Universities whose `has_stats_dept` is true, in input order
pub fn filter_with_stats(all: &[University]) -> Vec<University> {
    all.iter().filter(|u| u.has_stats_dept()).cloned().collect()
}

/// Write the filtered JSON and the text list; returns the filtered records
pub fn write_split(all: &[University], outputs: &SplitOutputs) -> Result<Vec<University>> {
    let stats_only = filter_with_stats(all);

    save_json(&outputs.stats_json, &stats_only)?;
    println!("Universities with statistics departments saved to {:?}", outputs.stats_json);

    save_text(&outputs.stats_report, &render_stats_list(&stats_only))?;
    println!("Text summary saved to {:?}", outputs.stats_report);

    Ok(stats_only)
}

/// Read `input`, split it, and write both outputs
pub fn split_file(input: &Path, outputs: &SplitOutputs) -> Result<Vec<University>> {
    let all: Vec<University> = load_json(input)?;
    let stats_only = write_split(&all, outputs)?;

    println!(
        "Found {} universities with statistics departments out of {} total",
        stats_only.len(),
        all.len()
    );
    Ok(stats_only)
}
