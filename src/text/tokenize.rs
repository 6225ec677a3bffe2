// Tokenizer/normalizer — raw extracted text to a filtered token sequence.
//
// Everything downstream (n-grams, term frequencies) works on the output of
// `normalize`, so the filtering rules live in exactly one place: strip
// non-letters, drop short tokens, drop stopwords. Token order is preserved
// because n-gram generation is order-sensitive, and duplicates are kept
// because the vector scorer needs frequencies.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use crate::config::Language;

/// Tokens must be longer than this to survive normalization.
const MIN_TOKEN_CHARS: usize = 2;

static NON_LETTER: OnceLock<Regex> = OnceLock::new();

/// The process-wide stopword set.
///
/// Loaded once at startup for the configured language and passed by shared
/// reference into every `normalize` call, never mutated afterward.
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Load the stopword list for a language from the stop-words crate.
    pub fn load(language: Language) -> Self {
        let list = match language {
            Language::English => get(LANGUAGE::English),
            Language::Indonesian => get(LANGUAGE::Indonesian),
            Language::Spanish => get(LANGUAGE::Spanish),
            Language::French => get(LANGUAGE::French),
            Language::German => get(LANGUAGE::German),
        };
        Self {
            words: list.into_iter().collect(),
        }
    }

    /// Build a set from explicit words. Used by tests and callers that
    /// need a custom list instead of a packaged one.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Normalize raw document text into an ordered token sequence.
///
/// Every character that is not an ASCII letter or whitespace becomes a
/// single space, the result is split on whitespace runs, and tokens that
/// are too short or belong to the stopword set are dropped. The input is
/// expected to be lower-cased already (the extractors do this).
///
/// There is no error path: empty input yields an empty sequence.
pub fn normalize(raw: &str, stopwords: &Stopwords) -> Vec<String> {
    let pattern =
        NON_LETTER.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").expect("static pattern compiles"));
    let cleaned = pattern.replace_all(raw, " ");

    cleaned
        .split_whitespace()
        .filter(|t| t.len() > MIN_TOKEN_CHARS && !stopwords.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_stopwords() -> Stopwords {
        Stopwords::from_words(["the", "and", "for", "this"])
    }

    #[test]
    fn strips_punctuation_and_digits() {
        let tokens = normalize("rust-lang 2021 edition, hello!", &test_stopwords());
        assert_eq!(tokens, vec!["rust", "lang", "edition", "hello"]);
    }

    #[test]
    fn drops_short_tokens_and_stopwords() {
        let tokens = normalize("the ox and an elephant walked for it", &test_stopwords());
        assert_eq!(tokens, vec!["elephant", "walked"]);
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let tokens = normalize("apple banana apple cherry", &test_stopwords());
        assert_eq!(tokens, vec!["apple", "banana", "apple", "cherry"]);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(normalize("", &test_stopwords()).is_empty());
        assert!(normalize("   \t\n ", &test_stopwords()).is_empty());
    }

    #[test]
    fn only_stopwords_and_short_words_yields_empty() {
        let tokens = normalize("the and it of to a", &test_stopwords());
        assert!(tokens.is_empty());
    }

    #[test]
    fn packaged_english_list_loads() {
        let stopwords = Stopwords::load(Language::English);
        assert!(!stopwords.is_empty());
        assert!(stopwords.contains("the"));
    }
}
