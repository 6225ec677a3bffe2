// Filesystem-backed reference corpus.
//
// Every supported document in the dataset directory is a reference
// document; its file name is its identifier. Listing is sorted by file
// name so the scan order, and therefore the first-seen tie-break, is
// deterministic across runs and platforms.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::extract;

pub struct CorpusStore {
    root: PathBuf,
}

impl CorpusStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the dataset directory if it doesn't exist yet.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create dataset directory {}", self.root.display()))
    }

    /// List (identifier, path) pairs for every supported document,
    /// sorted by file name.
    pub fn documents(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read dataset directory {}", self.root.display()))?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read dataset directory entry")?;
            let path = entry.path();
            if !path.is_file() || !extract::is_supported(&path) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            documents.push((name.to_string(), path));
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }

    /// Extract every document's raw text, in listing order.
    ///
    /// Extraction failures are logged and downgraded to an empty string.
    /// An unreadable reference then fails the token floor downstream and
    /// drops out of the scan, the same way a scanned PDF does.
    pub fn raw_documents(&self) -> Result<Vec<(String, String)>> {
        let mut references = Vec::new();
        for (name, path) in self.documents()? {
            match extract::read_document(&path) {
                Ok(text) => references.push((name, text)),
                Err(e) => {
                    warn!(reference = %name, error = %e, "Extraction failed, treating as empty");
                    references.push((name, String::new()));
                }
            }
        }
        Ok(references)
    }

    /// Copy a document into the dataset.
    ///
    /// Returns false if a file with the same name is already present; the
    /// existing reference wins and the source is left untouched.
    pub fn add(&self, source: &Path) -> Result<bool> {
        if !extract::is_supported(source) {
            anyhow::bail!(
                "Unsupported document format: {} (expected .pdf, .docx, or .txt)",
                source.display()
            );
        }
        let name = source
            .file_name()
            .with_context(|| format!("Source path has no file name: {}", source.display()))?;

        let destination = self.root.join(name);
        if destination.exists() {
            debug!(reference = %name.to_string_lossy(), "Already in dataset, not overwriting");
            return Ok(false);
        }

        fs::copy(source, &destination).with_context(|| {
            format!(
                "Failed to copy {} into the dataset",
                source.display()
            )
        })?;
        Ok(true)
    }
}
