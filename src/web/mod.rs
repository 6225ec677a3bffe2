// Web server — Axum JSON API over the similarity engine.
//
// Mirrors the upload -> verdict cycle of the CLI: POST a document, get the
// corpus verdict back as JSON. No HTML is rendered here; presentation is
// the consumer's problem.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::text::tokenize::Stopwords;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
///
/// The stopword set is loaded once here and shared read-only, the same
/// process-wide lifetime the CLI gives it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stopwords: Arc<Stopwords>,
}

/// Start the Axum server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let stopwords = Arc::new(Stopwords::load(config.language));
    let state = AppState {
        config: Arc::new(config),
        stopwords,
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Verbatim API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/check", post(handlers::check::check_document))
        .route("/api/corpus", get(handlers::corpus::list_corpus))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
