// Unit tests for text analysis: normalization and n-gram generation.
//
// These pin the filtering rules everything downstream depends on: the
// scorers assume tokens are letters-only, longer than two characters, and
// free of stopwords.

use verbatim::text::ngram::{ngrams, NGRAM_WIDTH};
use verbatim::text::tokenize::{normalize, Stopwords};

fn stopwords() -> Stopwords {
    Stopwords::from_words(["the", "and", "for", "with", "dan", "yang"])
}

// ============================================================
// normalize — filtering rules
// ============================================================

#[test]
fn punctuation_and_digits_become_separators() {
    let tokens = normalize("exam-2024: results, finalized!", &stopwords());
    assert_eq!(tokens, vec!["exam", "results", "finalized"]);
}

#[test]
fn tokens_of_length_two_or_less_are_dropped() {
    let tokens = normalize("an ox is on it go elephant", &stopwords());
    assert_eq!(tokens, vec!["elephant"]);
}

#[test]
fn stopwords_are_dropped_whatever_the_language_list() {
    let tokens = normalize("the thesis and dan analysis yang method", &stopwords());
    assert_eq!(tokens, vec!["thesis", "analysis", "method"]);
}

#[test]
fn only_stopwords_and_short_words_yield_empty_sequence() {
    let tokens = normalize("the and for it a an to", &stopwords());
    assert!(tokens.is_empty());
}

#[test]
fn order_and_duplicates_survive() {
    let tokens = normalize("alpha beta alpha gamma alpha", &stopwords());
    assert_eq!(tokens, vec!["alpha", "beta", "alpha", "gamma", "alpha"]);
}

#[test]
fn whitespace_runs_collapse() {
    let tokens = normalize("alpha   \t beta\n\n gamma", &stopwords());
    assert_eq!(tokens, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn non_ascii_letters_are_separators_too() {
    // The token pattern is ASCII letters only; accented characters split
    // words the same way punctuation does.
    let tokens = normalize("café naïve résumé", &stopwords());
    assert_eq!(tokens, vec!["caf", "sum"]);
}

// ============================================================
// ngrams — counts and ordering
// ============================================================

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn ngram_count_is_length_minus_two_at_default_width() {
    for len in 3..10 {
        let tokens: Vec<String> = (0..len).map(|i| format!("wordx{}", "z".repeat(i))).collect();
        assert_eq!(ngrams(&tokens, NGRAM_WIDTH).len(), len - 2);
    }
}

#[test]
fn each_ngram_holds_three_tokens_in_original_order() {
    let tokens = toks(&["first", "second", "third", "fourth"]);
    let grams = ngrams(&tokens, NGRAM_WIDTH);
    assert_eq!(grams, vec!["first second third", "second third fourth"]);
    for gram in &grams {
        assert_eq!(gram.split(' ').count(), 3);
    }
}

#[test]
fn short_sequences_yield_no_ngrams() {
    assert!(ngrams(&toks(&[]), NGRAM_WIDTH).is_empty());
    assert!(ngrams(&toks(&["one"]), NGRAM_WIDTH).is_empty());
    assert!(ngrams(&toks(&["one", "two"]), NGRAM_WIDTH).is_empty());
}

// ============================================================
// normalize -> ngrams chain
// ============================================================

#[test]
fn normalized_text_flows_into_ngrams() {
    let tokens = normalize(
        "the quick brown foxes jumped over the lazy hounds",
        &stopwords(),
    );
    assert_eq!(
        tokens,
        vec!["quick", "brown", "foxes", "jumped", "over", "lazy", "hounds"]
    );

    let grams = ngrams(&tokens, NGRAM_WIDTH);
    assert_eq!(grams.len(), 5);
    assert_eq!(grams[0], "quick brown foxes");
    assert_eq!(grams[4], "over lazy hounds");
}
