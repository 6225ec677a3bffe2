// POST /api/check — multipart document upload, returns the corpus verdict.
//
// The request cycle mirrors the CLI check: the upload is written to the
// scratch directory, extracted, scored against the dataset, retained as a
// new reference when accepted, and the scratch copy removed regardless of
// the outcome.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::corpus::store::CorpusStore;
use crate::extract;
use crate::scoring::verdict::{evaluate, EngineError};
use crate::text::tokenize::normalize;
use crate::web::{api_error, AppState};

pub async fn check_document(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    // Pull the upload out of the multipart body (field name: "doc")
    let mut file_name: Option<String> = None;
    let mut data: Option<axum::body::Bytes> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return api_error(
                    StatusCode::BAD_REQUEST,
                    &format!("invalid multipart body: {e}"),
                )
            }
        };
        if field.name() != Some("doc") {
            continue;
        }
        file_name = field.file_name().map(sanitize_file_name);
        data = match field.bytes().await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                return api_error(StatusCode::BAD_REQUEST, &format!("failed to read upload: {e}"))
            }
        };
    }

    let (Some(name), Some(data)) = (file_name, data) else {
        return api_error(StatusCode::BAD_REQUEST, "missing multipart field 'doc'");
    };

    let upload_path = state.config.upload_dir.join(&name);
    if !extract::is_supported(&upload_path) {
        return api_error(
            StatusCode::BAD_REQUEST,
            "unsupported document format (expected .pdf, .docx, or .txt)",
        );
    }

    if let Err(e) = tokio::fs::create_dir_all(&state.config.upload_dir).await {
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("failed to create upload directory: {e}"),
        );
    }
    if let Err(e) = tokio::fs::write(&upload_path, &data).await {
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("failed to store upload: {e}"),
        );
    }

    let result = run_check(&state, &upload_path);

    // The upload is scratch space; remove it whatever the outcome was.
    if let Err(e) = tokio::fs::remove_file(&upload_path).await {
        warn!(error = %e, "Failed to remove upload scratch file");
    }

    match result {
        Ok(response) | Err(response) => response,
    }
}

/// Extract, normalize, and score one uploaded document.
fn run_check(state: &AppState, path: &Path) -> Result<Response, Response> {
    let raw = extract::read_document(path).map_err(|e| {
        api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!("extraction failed: {e}"),
        )
    })?;

    let test_tokens = normalize(&raw, &state.stopwords);

    let store = CorpusStore::new(&state.config.dataset_dir);
    store
        .init()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;
    let references = store
        .raw_documents()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;

    match evaluate(&test_tokens, references, &state.stopwords) {
        Ok(verdict) => {
            // Accepted submissions join the corpus for future checks.
            if let Err(e) = store.add(path) {
                warn!(error = %e, "Failed to retain upload in the dataset");
            }
            Ok(Json(verdict).into_response())
        }
        Err(e @ EngineError::InsufficientContent { .. }) => {
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()))
        }
    }
}

/// Keep only the final path segment and replace anything outside
/// [A-Za-z0-9._-] so an upload can't escape the scratch directory.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd.txt"), "passwd.txt");
        assert_eq!(sanitize_file_name("c:\\uploads\\thesis.pdf"), "thesis.pdf");
    }

    #[test]
    fn sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_file_name("my thesis (v2).pdf"), "my_thesis__v2_.pdf");
    }
}
