// PDF text extraction via the pdf-extract crate.

use std::path::Path;

use super::ExtractError;

pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
