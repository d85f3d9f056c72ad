use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum::Json;
use serde_json::json;

use crate::services::benford::EngineError;

#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    ParseError(String),
    NoUsableData,
    DuplicateFile(String),
    FileNotFound(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::NoUsableData => write!(f, "No usable data was found in this file"),
            AppError::DuplicateFile(name) => {
                write!(f, "An uploaded file named '{}' already exists", name)
            }
            AppError::FileNotFound(name) => write!(f, "File not found: {}", name),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Parse(msg) => AppError::ParseError(msg),
            EngineError::NoViableColumns => AppError::NoUsableData,
            err @ (EngineError::ColumnOutOfRange { .. }
            | EngineError::ColumnNotViable(_)
            | EngineError::UnknownSignificanceLevel(_)) => {
                AppError::InvalidInput(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ParseError(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Error: This file could not be parsed as a .csv.".to_string(),
            ),
            AppError::NoUsableData => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Error: No usable data was found in this file.".to_string(),
            ),
            AppError::DuplicateFile(_) => (
                StatusCode::CONFLICT,
                "Error: An uploaded file with that name already exists.".to_string(),
            ),
            AppError::FileNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("File not found: {}", name))
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}
