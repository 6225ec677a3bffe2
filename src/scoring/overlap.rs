// N-gram set overlap — the exact-phrase copying signal.
//
// The metric is directional: it measures what fraction of the TEST
// document's phrase triplets reappear in the reference, not how similar
// the two documents are overall. Swapping the operands changes the result.
// Callers must always pass the submitted document first.

use std::collections::HashSet;

/// Fraction of the test document's n-grams present in the reference,
/// as a percentage in [0, 100].
///
/// Both sequences are deduplicated to sets first; only membership matters
/// here. Either side empty scores 0, a defined result rather than an error.
pub fn ngram_overlap(test_ngrams: &[String], reference_ngrams: &[String]) -> f64 {
    let test: HashSet<&str> = test_ngrams.iter().map(String::as_str).collect();
    let reference: HashSet<&str> = reference_ngrams.iter().map(String::as_str).collect();

    if test.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let shared = test.intersection(&reference).count();
    (shared as f64 / test.len() as f64) * 100.0
}
