//! HTTP routes and handlers

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use esgscope_core::{AnalysisResult, CategoryRow, Error};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::CorsConfig;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the ESG Risk Assessment API";
pub const UPLOAD_COMPLETE_MESSAGE: &str = "File uploaded and analysis completed";
pub const UNKNOWN_RISK_LEVEL: &str = "Unknown";

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    let api_routes = Router::new()
        .route("/upload", post(upload).layer(body_limit))
        .route("/esg-summary", get(esg_summary))
        .route("/esg-analysis", get(esg_analysis))
        .route("/esg-risk-level", get(esg_risk_level))
        .route("/risk-keywords", get(risk_keywords))
        .route("/risk-sentences", get(risk_sentences));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub report: Arc<AnalysisResult>,
}

/// Accept a document in the `file` multipart field and analyze it
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|_| AppError::BadRequest("No file uploaded".to_string()))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed upload: {}", e);
        AppError::Rejected(e.status(), e.body_text())
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    if file_name.is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }

    info!(file = %file_name, bytes = bytes.len(), "Received upload");

    let worker = state.clone();
    let report = tokio::task::spawn_blocking(move || worker.process_document(&bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("Analysis task failed: {}", e)))??;

    Ok(Json(UploadResponse {
        message: UPLOAD_COMPLETE_MESSAGE,
        report,
    }))
}

async fn esg_summary(State(state): State<AppState>) -> Json<serde_json::Value> {
    let summary = state
        .latest()
        .map(|result| result.summary.clone())
        .unwrap_or_default();
    Json(json!({ "summary": summary }))
}

async fn esg_analysis(State(state): State<AppState>) -> Json<Vec<CategoryRow>> {
    let rows = state
        .latest()
        .map(|result| result.scorecard.rows())
        .unwrap_or_default();
    Json(rows)
}

async fn esg_risk_level(State(state): State<AppState>) -> Json<serde_json::Value> {
    let risk_level = state
        .latest()
        .map(|result| result.risk_level().label().to_string())
        .unwrap_or_else(|| UNKNOWN_RISK_LEVEL.to_string());
    Json(json!({ "risk_level": risk_level }))
}

async fn risk_keywords(State(state): State<AppState>) -> Json<BTreeMap<String, u64>> {
    let counts = state
        .latest()
        .map(|result| result.flags.keyword_counts.clone())
        .unwrap_or_default();
    Json(counts)
}

async fn risk_sentences(State(state): State<AppState>) -> Json<Vec<String>> {
    let sentences = state
        .latest()
        .map(|result| result.flags.sentences.clone())
        .unwrap_or_default();
    Json(sentences)
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("{0}")]
    InternalError(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        if err.is_no_content() {
            AppError::BadRequest("No text found in the PDF".to_string())
        } else {
            AppError::InternalError(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected(status, _) => *status,
            AppError::InternalError(msg) => {
                error!("Upload failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
