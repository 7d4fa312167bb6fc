use std::collections::HashSet;

use crate::requirements::extract::{MAX_FUNDING, MAX_PREREQUISITES};
use crate::types::{CombinedRequirements, PageRequirements};

/// Merge per-page results: first non-null scalar wins, lists are unioned
/// and deduplicated in first-seen order, then capped.
pub fn combine(pages: &[PageRequirements]) -> CombinedRequirements {
    let mut combined = CombinedRequirements::default();

    for page in pages {
        combined.source_urls.push(page.url.clone());

        if combined.gre_required.is_none() {
            combined.gre_required = page.gre_required;
        }
        if combined.gpa_requirement.is_none() {
            combined.gpa_requirement = page.gpa_requirement;
        }
        if combined.application_deadline.is_none() {
            combined.application_deadline = page.application_deadline.clone();
        }
        if combined.duration.is_none() {
            combined.duration = page.duration.clone();
        }

        combined.prerequisites.extend(page.prerequisites.iter().cloned());
        combined.research_areas.extend(page.research_areas.iter().cloned());
        combined.funding_info.extend(page.funding_info.iter().cloned());

        if let Some(raw) = &page.raw_requirements {
            combined.raw_requirements.push(raw.clone());
        }
    }

    combined.prerequisites = dedup_first_seen(combined.prerequisites);
    combined.prerequisites.truncate(MAX_PREREQUISITES);
    combined.research_areas = dedup_first_seen(combined.research_areas);
    combined.funding_info = dedup_first_seen(combined.funding_info);
    combined.funding_info.truncate(MAX_FUNDING);

    combined
}

fn dedup_first_seen(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
