use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::{AnalysisResponse, FileListResponse, PreviewResponse},
    services::benford::SignificanceLevel,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/csv", get(list_files))
        .route("/csv/:filename", post(upload_csv).delete(delete_csv))
        .route("/csv/:filename/preview", get(preview_csv))
        .route("/csv/:filename/analysis", get(analyze_csv))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// Treat the first row as a header.
    #[serde(default)]
    pub header: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    /// 0-based index of the selected column; must be viable.
    pub column: usize,
    #[serde(default)]
    pub header: bool,
    /// Optional significance level; when set, only that level's verdict is
    /// returned instead of all five.
    pub level: Option<String>,
}

async fn upload_csv(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<PreviewResponse>), AppError> {
    tracing::info!("Upload '{}', {} bytes", filename, body.len());

    if body.len() > state.config.max_file_size {
        return Err(AppError::InvalidInput(format!(
            "file exceeds the {} byte upload limit",
            state.config.max_file_size
        )));
    }

    let table = state.analyzer.parse(&body)?;
    tracing::info!(
        "Parsed '{}': {} rows x {} columns, {} discarded",
        filename,
        table.rows.len(),
        table.width,
        table.discarded_rows
    );

    let preview = state.analyzer.preview(&table, false);
    state.store.insert(&filename, table)?;

    Ok((
        StatusCode::CREATED,
        Json(PreviewResponse::new(&filename, &preview)),
    ))
}

async fn delete_csv(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(&filename) {
        tracing::info!("Removed '{}'", filename);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::FileNotFound(filename))
    }
}

async fn list_files(State(state): State<Arc<AppState>>) -> Json<FileListResponse> {
    Json(FileListResponse::new(&state.store.list()))
}

async fn preview_csv(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Query(params): Query<PreviewParams>,
) -> Result<Json<PreviewResponse>, AppError> {
    let table = state
        .store
        .get(&filename)
        .ok_or_else(|| AppError::FileNotFound(filename.clone()))?;

    let preview = state.analyzer.preview(&table, params.header);
    Ok(Json(PreviewResponse::new(&filename, &preview)))
}

async fn analyze_csv(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Query(params): Query<AnalysisParams>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let table = state
        .store
        .get(&filename)
        .ok_or_else(|| AppError::FileNotFound(filename.clone()))?;

    // Validate the level before doing any work, so a bad level never
    // reports a half-built analysis.
    let level = params
        .level
        .as_deref()
        .map(SignificanceLevel::from_label)
        .transpose()?;

    let result = state.analyzer.analyze(&table, params.column, params.header)?;
    tracing::info!(
        "Analyzed '{}' column {}: n={}, excluded={}, statistic={}",
        filename,
        params.column,
        result.frequency.n,
        result.frequency.excluded_count,
        result.test_statistic
    );

    let mut response = AnalysisResponse::new(&filename, &result);
    if let Some(level) = level {
        response = response.at_level(level.label());
    }
    Ok(Json(response))
}
