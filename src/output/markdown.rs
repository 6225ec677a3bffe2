// Markdown report generation — the same data the terminal shows, written
// to a file that can be attached to a review ticket.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::scoring::verdict::{Classification, CorpusVerdict};

/// Write a markdown report for one verdict. Returns the path written.
pub fn generate_report(verdict: &CorpusVerdict, test_name: &str, path: &str) -> Result<String> {
    let mut out = String::new();

    out.push_str("# Verbatim similarity report\n\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("Submitted document: `{test_name}`\n\n"));
    out.push_str(&format!(
        "**Verdict: {}**\n\n",
        verdict.classification.as_str()
    ));

    if verdict.classification == Classification::EmptyCorpus {
        out.push_str("No reference document had enough extractable text to score against.\n");
    } else {
        out.push_str(&format!("Best score: {:.2}/100", verdict.best_score));
        if let Some(reference) = &verdict.best_reference {
            out.push_str(&format!(" (against `{reference}`)"));
        }
        out.push_str("\n\n");

        out.push_str("| Rank | Reference | Overlap | Cosine | Hybrid |\n");
        out.push_str("|-----:|-----------|--------:|-------:|-------:|\n");
        for (i, result) in super::ranked_comparisons(verdict).iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} | {:.2} |\n",
                i + 1,
                result.reference.replace('|', "\\|"),
                result.overlap,
                result.cosine,
                result.hybrid,
            ));
        }
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
        }
    }
    fs::write(path, out).with_context(|| format!("Failed to write report to {path}"))?;

    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::verdict::ComparisonResult;

    #[test]
    fn report_contains_verdict_and_table() {
        let verdict = CorpusVerdict {
            best_score: 72.5,
            best_reference: Some("thesis.pdf".to_string()),
            comparisons: vec![
                ComparisonResult {
                    reference: "thesis.pdf".to_string(),
                    overlap: 80.0,
                    cosine: 65.0,
                    hybrid: 72.5,
                },
                ComparisonResult {
                    reference: "notes.txt".to_string(),
                    overlap: 10.0,
                    cosine: 20.0,
                    hybrid: 15.0,
                },
            ],
            classification: Classification::Flagged,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        generate_report(&verdict, "submission.pdf", path.to_str().unwrap()).unwrap();

        let report = fs::read_to_string(&path).unwrap();
        assert!(report.contains("flagged as copied"));
        assert!(report.contains("72.50/100"));
        assert!(report.contains("| 1 | thesis.pdf |"));
        assert!(report.contains("| 2 | notes.txt |"));
    }

    #[test]
    fn empty_corpus_report_has_no_table() {
        let verdict = CorpusVerdict {
            best_score: 0.0,
            best_reference: None,
            comparisons: Vec::new(),
            classification: Classification::EmptyCorpus,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        generate_report(&verdict, "submission.pdf", path.to_str().unwrap()).unwrap();

        let report = fs::read_to_string(&path).unwrap();
        assert!(report.contains("empty corpus"));
        assert!(!report.contains("| Rank |"));
    }
}
