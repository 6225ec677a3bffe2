use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which stopword list the tokenizer loads at startup.
///
/// The list is fixed for the lifetime of the process; every document in a
/// scan is normalized against the same set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Language {
    /// English stopwords (default)
    English,
    /// Indonesian stopwords
    Indonesian,
    Spanish,
    French,
    German,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Indonesian => "indonesian",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// Nothing here is secret, but the .env file is still loaded automatically
/// at startup via dotenvy so deployments can pin paths without wrapper
/// scripts.
pub struct Config {
    /// Directory holding the reference corpus (default: ./dataset)
    pub dataset_dir: PathBuf,
    /// Scratch directory for uploads passing through the web layer
    /// (default: ./uploads)
    pub upload_dir: PathBuf,
    /// Stopword language for the tokenizer (default: english)
    pub language: Language,
    /// Crossref API base URL, overridable for testing against a stub
    pub crossref_api_url: String,
    /// Contact string sent in the Crossref user-agent (polite pool)
    pub crossref_mailto: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every value has a default; `init` and `check` work out of the box
    /// in an empty directory.
    pub fn load() -> Result<Self> {
        let language = match env::var("VERBATIM_LANGUAGE").as_deref() {
            Ok("indonesian") => Language::Indonesian,
            Ok("spanish") => Language::Spanish,
            Ok("french") => Language::French,
            Ok("german") => Language::German,
            Ok("english") => Language::English,
            Ok(other) => {
                anyhow::bail!(
                    "Unsupported VERBATIM_LANGUAGE '{other}'.\n\
                     Supported values: english, indonesian, spanish, french, german"
                );
            }
            Err(_) => Language::English,
        };

        Ok(Self {
            dataset_dir: env::var("VERBATIM_DATASET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./dataset")),
            upload_dir: env::var("VERBATIM_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            language,
            crossref_api_url: env::var("CROSSREF_API_URL")
                .unwrap_or_else(|_| crate::crossref::DEFAULT_API_URL.to_string()),
            crossref_mailto: env::var("CROSSREF_MAILTO").unwrap_or_default(),
        })
    }

    /// Check that the dataset directory exists.
    /// Call this before any operation that scans the corpus.
    pub fn require_dataset(&self) -> Result<()> {
        if !self.dataset_dir.is_dir() {
            anyhow::bail!(
                "Dataset directory not found: {}\n\
                 Run `verbatim init` to create it, or set VERBATIM_DATASET_DIR.",
                self.dataset_dir.display()
            );
        }
        Ok(())
    }
}
