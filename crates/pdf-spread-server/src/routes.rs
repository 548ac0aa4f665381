//! Router and handlers

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::upload::SpreadUpload;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use pdf_spread::{SpreadError, impose_bytes};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Shared, read-only per-deployment settings
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Impose the uploaded document and return it as an attachment
async fn merge_spread(
    State(state): State<AppState>,
    upload: SpreadUpload,
) -> Result<Response, ApiError> {
    let SpreadUpload { pdf, pairings } = upload;
    let options = &state.config().options;
    let pairings = pairings.unwrap_or_else(|| options.pairings.clone());
    let config = options.config;

    tracing::info!(
        "Imposing {} byte upload onto {} sheets",
        pdf.len(),
        pairings.len()
    );

    // Every request gets its own documents; the pipeline itself is blocking
    let started = Instant::now();
    let output = tokio::task::spawn_blocking(move || impose_bytes(&pdf, &pairings, &config))
        .await
        .map_err(SpreadError::from)??;
    tracing::info!(
        "Produced {} byte spread in {:?}",
        output.len(),
        started.elapsed()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                state.config().content_disposition(),
            ),
        ],
        output,
    )
        .into_response())
}

pub fn router(config: ServerConfig) -> Router {
    let body_limit = config.body_limit_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/merge-spread", post(merge_spread))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}
