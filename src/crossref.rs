// Crossref metadata search — optional corpus auto-population.
//
// A thin reqwest wrapper over the works API. Given a keyword query built
// from the test document, it returns published abstracts that are long
// enough to act as reference documents. The similarity engine never talks
// to this module; whatever it returns is appended to the reference list
// before the scan starts, and the engine sees it like any other document.

use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde::Deserialize;
use tracing::debug;

/// Default Crossref API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.crossref.org";

/// Abstracts must be longer than this (in characters) to join the corpus.
pub const MIN_ABSTRACT_CHARS: usize = 200;

/// How many of the test document's most frequent tokens form the query.
pub const QUERY_TOKENS: usize = 5;

/// How many works to request per search.
const SEARCH_ROWS: u32 = 10;

static JATS_TAG: OnceLock<Regex> = OnceLock::new();

pub struct CrossrefClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(Deserialize)]
struct Work {
    #[serde(default)]
    title: Vec<String>,
    /// JATS XML fragment, not plain text
    #[serde(rename = "abstract")]
    abstract_xml: Option<String>,
}

impl CrossrefClient {
    /// Create a client for the given API base URL.
    ///
    /// Crossref asks for a contact address in the user-agent to route
    /// requests through the polite pool; `mailto` may be empty.
    pub fn new(base_url: &str, mailto: &str) -> Result<Self> {
        let user_agent = if mailto.is_empty() {
            "verbatim/0.1 (plagiarism-detection)".to_string()
        } else {
            format!("verbatim/0.1 (plagiarism-detection; mailto:{mailto})")
        };

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search the works API and return (identifier, abstract text) pairs
    /// usable as reference documents.
    ///
    /// Works without an abstract, and abstracts at or under
    /// MIN_ABSTRACT_CHARS, are dropped. Order follows the API's relevance
    /// ranking, which keeps the downstream scan deterministic for a fixed
    /// response.
    pub async fn fetch_references(&self, query: &str) -> Result<Vec<(String, String)>> {
        let url = format!("{}/works", self.base_url);
        let rows = SEARCH_ROWS.to_string();

        debug!(query = query, "Crossref works search");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("rows", rows.as_str()),
                ("select", "title,abstract"),
            ])
            .send()
            .await
            .context("Crossref request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Crossref returned {status} for query '{query}'");
        }

        let works: WorksResponse = response
            .json()
            .await
            .context("Failed to deserialize Crossref response")?;

        let mut references = Vec::new();
        for work in works.message.items {
            let Some(raw) = work.abstract_xml else {
                continue;
            };
            let text = strip_jats(&raw);
            if text.chars().count() <= MIN_ABSTRACT_CHARS {
                continue;
            }
            let title = work
                .title
                .first()
                .cloned()
                .unwrap_or_else(|| "untitled".to_string());
            references.push((format!("crossref: {title}"), text.to_lowercase()));
        }

        debug!(references = references.len(), "Crossref abstracts accepted");
        Ok(references)
    }
}

/// Build the search query from the test document: its top QUERY_TOKENS
/// most frequent tokens joined by spaces. Ties break alphabetically so
/// the query is deterministic for a given document.
pub fn keyword_query(tokens: &[String]) -> String {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(QUERY_TOKENS)
        .map(|(token, _)| token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Crossref abstracts arrive as JATS XML fragments. Strip the tags and
/// collapse the whitespace they leave behind.
fn strip_jats(raw: &str) -> String {
    let tag = JATS_TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("static pattern compiles"));
    let stripped = tag.replace_all(raw, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keyword_query_ranks_by_frequency() {
        let tokens = toks(&[
            "citrus", "citrus", "citrus", "banana", "banana", "apple", "durian", "banana",
        ]);
        assert_eq!(keyword_query(&tokens), "banana citrus apple durian");
    }

    #[test]
    fn keyword_query_breaks_ties_alphabetically() {
        let tokens = toks(&["pear", "mango", "pear", "mango", "kiwi", "kiwi"]);
        assert_eq!(keyword_query(&tokens), "kiwi mango pear");
    }

    #[test]
    fn keyword_query_caps_at_five_tokens() {
        let tokens = toks(&["fff", "eee", "ddd", "ccc", "bbb", "aaa"]);
        let query = keyword_query(&tokens);
        assert_eq!(query.split_whitespace().count(), QUERY_TOKENS);
        assert_eq!(query, "aaa bbb ccc ddd eee");
    }

    #[test]
    fn keyword_query_of_nothing_is_empty() {
        assert_eq!(keyword_query(&[]), "");
    }

    #[test]
    fn jats_tags_are_stripped() {
        let raw = "<jats:p>Deep learning has <jats:italic>transformed</jats:italic> \
                   document analysis.</jats:p>";
        assert_eq!(
            strip_jats(raw),
            "Deep learning has transformed document analysis."
        );
    }

    #[test]
    fn stripping_plain_text_is_identity_modulo_whitespace() {
        assert_eq!(strip_jats("already   plain text"), "already plain text");
    }
}
