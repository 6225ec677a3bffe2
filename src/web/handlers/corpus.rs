// GET /api/corpus — list the reference documents in the dataset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::corpus::store::CorpusStore;
use crate::web::{api_error, AppState};

pub async fn list_corpus(State(state): State<AppState>) -> Response {
    let store = CorpusStore::new(&state.config.dataset_dir);
    match store.documents() {
        Ok(documents) => {
            let names: Vec<String> = documents.into_iter().map(|(name, _)| name).collect();
            Json(serde_json::json!({
                "count": names.len(),
                "documents": names,
            }))
            .into_response()
        }
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}
