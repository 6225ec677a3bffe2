// Hybrid score — equal-weighted combination of overlap and cosine.
//
// Overlap catches intact copied phrases; cosine catches reworded passages
// that reuse the same vocabulary. Equal weighting folds both into one
// comparable percentage. The weights are fixed design constants, not
// configuration.

use crate::text::ngram::{ngrams, NGRAM_WIDTH};

use super::cosine::cosine_similarity;
use super::overlap::ngram_overlap;

const OVERLAP_WEIGHT: f64 = 0.5;
const COSINE_WEIGHT: f64 = 0.5;

/// Combine unrounded sub-scores into the final hybrid percentage.
///
/// Rounding happens here and only here. The sub-scores must arrive
/// unrounded so a full corpus scan doesn't compound rounding error.
/// Sub-scores rounded for display are a reporting concern and never feed
/// back into this computation.
pub fn combine(overlap: f64, cosine: f64) -> f64 {
    round2(OVERLAP_WEIGHT * overlap + COSINE_WEIGHT * cosine)
}

/// Hybrid similarity of two token sequences, in [0, 100], rounded to two
/// decimal places. The first operand must be the submitted document; the
/// overlap component is directional.
pub fn hybrid_score(test_tokens: &[String], reference_tokens: &[String]) -> f64 {
    let overlap = ngram_overlap(
        &ngrams(test_tokens, NGRAM_WIDTH),
        &ngrams(reference_tokens, NGRAM_WIDTH),
    );
    let cosine = cosine_similarity(test_tokens, reference_tokens);
    combine(overlap, cosine)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
