// Term-frequency cosine similarity — the loose-wording signal.
//
// Where the overlap scorer looks for intact phrases, this compares the two
// documents' word-frequency vectors, so heavy reuse of the same vocabulary
// registers even when the phrasing was shuffled.

use std::collections::HashMap;

/// Cosine similarity of two token sequences' term-frequency vectors,
/// as a percentage in [0, 100]. Symmetric in its arguments.
pub fn cosine_similarity(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    let freq_a = term_frequencies(tokens_a);
    let freq_b = term_frequencies(tokens_b);

    // Tokens unique to one side contribute zero to the dot product, so
    // summing over the smaller map's entries is equivalent to summing over
    // the vocabulary union.
    let dot: f64 = freq_a
        .iter()
        .filter_map(|(token, count_a)| {
            freq_b
                .get(token)
                .map(|count_b| f64::from(*count_a) * f64::from(*count_b))
        })
        .sum();

    let mag_a = magnitude(&freq_a);
    let mag_b = magnitude(&freq_b);

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    (dot / (mag_a * mag_b)) * 100.0
}

/// Occurrence count per token.
fn term_frequencies(tokens: &[String]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Euclidean norm of a frequency vector over its own vocabulary.
fn magnitude(frequencies: &HashMap<&str, u32>) -> f64 {
    frequencies
        .values()
        .map(|&c| f64::from(c) * f64::from(c))
        .sum::<f64>()
        .sqrt()
}
