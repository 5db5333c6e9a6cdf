//! API error handling
//!
//! Author: hephaex@gmail.com

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::query::QueryError;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::new(
            "MISSING_PARAMETER",
            format!("Required query parameter '{name}' is missing"),
        )
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    MissingParameter(&'static str),
    Extraction(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::MissingParameter(name) => {
                (StatusCode::BAD_REQUEST, ApiError::missing_parameter(name))
            }
            AppError::Extraction(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("EXTRACTION_ERROR", "Extraction failed").with_details(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error().with_details(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<openie_core::OpenIeError> for AppError {
    fn from(err: openie_core::OpenIeError) -> Self {
        use openie_core::OpenIeError;

        match err {
            OpenIeError::Engine(msg) => AppError::Extraction(msg),
            OpenIeError::InvalidInput(msg) => AppError::BadRequest(msg),
            OpenIeError::Serialization(err) => {
                AppError::Internal(format!("Serialization error: {err}"))
            }
            OpenIeError::ConfigError(msg) => AppError::Internal(format!("Configuration error: {msg}")),
            OpenIeError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}
