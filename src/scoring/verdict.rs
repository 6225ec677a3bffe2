// Corpus comparator — scans the reference set, tracks the best match,
// and classifies the result.
//
// The scan is strictly sequential. Best-so-far updates use strict
// greater-than, so a tie keeps the first reference encountered, which is
// why callers must enumerate the corpus in a deterministic order.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::text::ngram::{ngrams, NGRAM_WIDTH};
use crate::text::tokenize::{normalize, Stopwords};

use super::cosine::cosine_similarity;
use super::hybrid::{combine, round2};
use super::overlap::ngram_overlap;

/// Documents that normalize to fewer tokens than this are too short to
/// score reliably (scanned-image PDFs mostly). For a reference document
/// this means silent exclusion; for the test document it is a hard
/// precondition and the scan is rejected outright.
pub const MIN_TOKENS: usize = 30;

/// A best hybrid score at or above this flags the submission as copied.
pub const FLAG_THRESHOLD: f64 = 50.0;

/// Typed rejection from the similarity engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(
        "test document normalized to {tokens} tokens, below the {MIN_TOKENS}-token floor \
         (too little text, or a scanned PDF with no text layer)"
    )]
    InsufficientContent { tokens: usize },
}

/// Verdict label derived from the best hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Best score reached the flagging threshold
    Flagged,
    /// Genuine scoring happened, nothing reached the threshold
    Clean,
    /// No reference document survived filtering; distinct from a clean
    /// scan, there was nothing to compare against
    EmptyCorpus,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Flagged => "flagged as copied",
            Classification::Clean => "not flagged",
            Classification::EmptyCorpus => "empty corpus",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score breakdown for one (test, reference) pair. Immutable once built.
///
/// The overlap and cosine fields are rounded to two decimals for
/// reporting; the hybrid field was combined from the unrounded values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub reference: String,
    pub overlap: f64,
    pub cosine: f64,
    pub hybrid: f64,
}

/// Outcome of one full corpus scan. Owned by the caller, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusVerdict {
    pub best_score: f64,
    pub best_reference: Option<String>,
    pub comparisons: Vec<ComparisonResult>,
    pub classification: Classification,
}

/// Scan the reference corpus and produce a verdict for the test document.
///
/// `references` yields (identifier, raw text) pairs; each reference is
/// normalized here, and references below the token floor are skipped
/// without leaving a trace in the verdict. A test document below the floor
/// is rejected before any reference is read.
pub fn evaluate<I>(
    test_tokens: &[String],
    references: I,
    stopwords: &Stopwords,
) -> Result<CorpusVerdict, EngineError>
where
    I: IntoIterator<Item = (String, String)>,
{
    if test_tokens.len() < MIN_TOKENS {
        return Err(EngineError::InsufficientContent {
            tokens: test_tokens.len(),
        });
    }

    // The test document's n-grams are fixed for the whole scan.
    let test_ngrams = ngrams(test_tokens, NGRAM_WIDTH);

    let mut best_score = 0.0;
    let mut best_reference: Option<String> = None;
    let mut comparisons = Vec::new();

    for (reference, raw_text) in references {
        let reference_tokens = normalize(&raw_text, stopwords);
        if reference_tokens.len() < MIN_TOKENS {
            debug!(
                reference = %reference,
                tokens = reference_tokens.len(),
                "Reference below token floor, excluded from scan"
            );
            continue;
        }

        let overlap = ngram_overlap(&test_ngrams, &ngrams(&reference_tokens, NGRAM_WIDTH));
        let cosine = cosine_similarity(test_tokens, &reference_tokens);
        let hybrid = combine(overlap, cosine);

        if hybrid > best_score {
            best_score = hybrid;
            best_reference = Some(reference.clone());
        }

        comparisons.push(ComparisonResult {
            reference,
            overlap: round2(overlap),
            cosine: round2(cosine),
            hybrid,
        });
    }

    let classification = if comparisons.is_empty() {
        Classification::EmptyCorpus
    } else if best_score >= FLAG_THRESHOLD {
        Classification::Flagged
    } else {
        Classification::Clean
    };

    Ok(CorpusVerdict {
        best_score,
        best_reference,
        comparisons,
        classification,
    })
}
