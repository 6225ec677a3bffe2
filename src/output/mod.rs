// Output formatting — terminal display and report generation.

pub mod markdown;
pub mod terminal;

use crate::scoring::verdict::{ComparisonResult, CorpusVerdict};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..40]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters in reference titles.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// The verdict's comparisons ranked by hybrid score, highest first.
///
/// The verdict itself keeps scan order (the tie-break contract); both
/// presentation layers want a ranked view, built here once. The sort is
/// stable, so tied references stay in scan order.
pub fn ranked_comparisons(verdict: &CorpusVerdict) -> Vec<&ComparisonResult> {
    let mut ranked: Vec<&ComparisonResult> = verdict.comparisons.iter().collect();
    ranked.sort_by(|a, b| {
        b.hybrid
            .partial_cmp(&a.hybrid)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
