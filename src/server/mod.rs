// SPDX-License-Identifier: MIT

use axum::{
    extract::{Form, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::process::element::ProcessElement;
use crate::process::extractor::ProcessExtractor;

#[derive(Clone)]
pub struct AppState {
    extractor: Arc<ProcessExtractor>,
}

impl AppState {
    pub fn new(extractor: Arc<ProcessExtractor>) -> Self {
        Self { extractor }
    }
}

type ApiResult = Result<Json<Vec<ProcessElement>>, (StatusCode, Json<Value>)>;

pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api", post(describe_process))
        .route("/api/extract", post(extract_process));

    let app = match static_dir {
        Some(dir) => {
            log::info!("Serving frontend from {}", dir.display());
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(
    port: u16,
    extractor: Arc<ProcessExtractor>,
    static_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(AppState::new(extractor), static_dir);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Form post from the web frontend
#[derive(Debug, Deserialize)]
struct DescriptionForm {
    text: Option<String>,
    process_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    text: String,
}

async fn describe_process(
    State(state): State<AppState>,
    Form(form): Form<DescriptionForm>,
) -> ApiResult {
    let Some(text) = form.text.or(form.process_description) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing form field 'text'" })),
        ));
    };
    Ok(extract(&state, &text).await)
}

async fn extract_process(
    State(state): State<AppState>,
    Json(payload): Json<ExtractRequest>,
) -> ApiResult {
    Ok(extract(&state, &payload.text).await)
}

async fn extract(state: &AppState, text: &str) -> Json<Vec<ProcessElement>> {
    log::info!("Extracting process from {} chars", text.len());
    let elements = state.extractor.extract_process(text).await;
    log::info!("Extracted {} elements", elements.len());
    Json(elements)
}
