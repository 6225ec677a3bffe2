// Document text extraction — PDF, DOCX, and plain text.
//
// This is the only boundary where binary formats enter the system. The
// engine downstream expects lower-cased text and treats an empty string as
// "zero tokens", so extraction failures are typed here and callers decide
// whether to surface them or downgrade to an empty document.

use std::path::Path;

use thiserror::Error;

mod docx;
mod pdf;

/// File extensions the extractors understand.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0} (expected .pdf, .docx, or .txt)")]
    Unsupported(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF extraction failed for {path}: {message}")]
    Pdf { path: String, message: String },

    #[error("DOCX extraction failed for {path}: {message}")]
    Docx { path: String, message: String },
}

/// Whether a path's extension is one the extractors can handle.
pub fn is_supported(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Extract a document's text, lower-cased.
///
/// An empty string is a valid result: a scanned-image PDF has no text
/// layer but is still a readable file. Only genuinely broken or
/// unsupported inputs return an error.
pub fn read_document(path: &Path) -> Result<String, ExtractError> {
    let ext = extension_of(path)
        .ok_or_else(|| ExtractError::Unsupported(path.display().to_string()))?;

    let text = match ext.as_str() {
        "pdf" => pdf::extract(path)?,
        "docx" => docx::extract(path)?,
        "txt" => std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.display().to_string(),
            source,
        })?,
        other => return Err(ExtractError::Unsupported(other.to_string())),
    };

    Ok(text.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported(Path::new("thesis.PDF")));
        assert!(is_supported(Path::new("thesis.docx")));
        assert!(is_supported(Path::new("notes.Txt")));
        assert!(!is_supported(Path::new("image.png")));
        assert!(!is_supported(Path::new("noextension")));
    }

    #[test]
    fn unknown_extension_is_a_typed_error() {
        let err = read_document(Path::new("slides.pptx")).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(_)));
    }

    #[test]
    fn plain_text_is_lowercased() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        writeln!(file, "The Quick BROWN Fox").unwrap();
        let text = read_document(file.path()).unwrap();
        assert_eq!(text.trim(), "the quick brown fox");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_document(Path::new("/nonexistent/missing.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
