// Colored terminal output for corpus verdicts.
//
// This module handles all terminal-specific formatting: colors, tables,
// summary lines. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::scoring::verdict::{Classification, CorpusVerdict};

/// Display a full corpus verdict: classification, best match, and the
/// per-reference breakdown ranked by hybrid score.
pub fn display_verdict(verdict: &CorpusVerdict) {
    println!(
        "\n{}",
        format!(
            "=== Similarity Report ({} references scored) ===",
            verdict.comparisons.len()
        )
        .bold()
    );

    println!(
        "  Verdict: {}",
        colorize_classification(verdict.classification)
    );

    if verdict.classification == Classification::EmptyCorpus {
        println!("  No reference document had enough extractable text to score against.");
        println!("  Add documents with `verbatim add <file>` and try again.");
        return;
    }

    println!("  Best score: {:.2}/100", verdict.best_score);
    if let Some(reference) = &verdict.best_reference {
        println!("  Best match: {reference}");
    }
    println!();

    // Header
    println!(
        "  {:>4}  {:<44} {:>8}  {:>8}  {:>8}",
        "Rank".dimmed(),
        "Reference".dimmed(),
        "Overlap".dimmed(),
        "Cosine".dimmed(),
        "Hybrid".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    for (i, result) in super::ranked_comparisons(verdict).iter().enumerate() {
        let name = super::truncate_chars(&result.reference, 42);
        let hybrid = format!("{:>8.2}", result.hybrid);
        let hybrid = if result.hybrid >= crate::scoring::verdict::FLAG_THRESHOLD {
            hybrid.red().bold()
        } else {
            hybrid.normal()
        };

        println!(
            "  {:>4}. {:<44} {:>8.2}  {:>8.2}  {}",
            i + 1,
            name,
            result.overlap,
            result.cosine,
            hybrid,
        );
    }
    println!();
}

fn colorize_classification(classification: Classification) -> colored::ColoredString {
    match classification {
        Classification::Flagged => classification.as_str().red().bold(),
        Classification::Clean => classification.as_str().green(),
        Classification::EmptyCorpus => classification.as_str().yellow(),
    }
}
