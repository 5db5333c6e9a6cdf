//! Extraction request dispatcher
//!
//! A single handler serves every path. Routing is by method only:
//! `GET` runs an extraction, `OPTIONS` advertises the allowed methods and
//! anything else is answered with 405.
//!
//! Author: hephaex@gmail.com

use crate::error::AppError;
use crate::query::QueryParams;
use crate::state::AppState;
use axum::{
    extract::{RawQuery, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Name of the query parameter carrying the input text
pub const TEXT_PARAM: &str = "text";

/// Value of the `Allow` header
pub const ALLOWED_METHODS: &str = "GET,OPTIONS";

/// Content type of extraction responses
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Route a request by method
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    state.increment_requests();

    // Method tokens are matched case-insensitively
    match method.as_str().to_ascii_uppercase().as_str() {
        "GET" => extract_relations(&state, query.as_deref()).await,
        "OPTIONS" => Ok(allow_response(StatusCode::OK)),
        _ => {
            tracing::debug!(%method, "Method not allowed");
            Ok(allow_response(StatusCode::METHOD_NOT_ALLOWED))
        }
    }
}

/// Run the engine over the first `text` parameter and serialize the result
async fn extract_relations(state: &AppState, raw_query: Option<&str>) -> Result<Response, AppError> {
    let params = QueryParams::parse(raw_query).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed query string");
    })?;

    // Only the first occurrence is used; a bare `text` counts as empty input
    let Some(text) = params.first(TEXT_PARAM) else {
        tracing::info!("Request without '{}' parameter", TEXT_PARAM);
        return Err(AppError::MissingParameter(TEXT_PARAM));
    };
    let text = text.unwrap_or_default();

    tracing::debug!(
        engine = state.engine.name(),
        chars = text.chars().count(),
        "Extracting relations"
    );

    let extractions = state.engine.extract(text).await.inspect_err(|e| {
        tracing::error!(engine = state.engine.name(), error = %e, "Extraction failed");
    })?;

    tracing::debug!(count = extractions.len(), "Extraction completed");

    let body = openie_core::serialize(&extractions)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        body,
    )
        .into_response())
}

fn allow_response(status: StatusCode) -> Response {
    (status, [(header::ALLOW, ALLOWED_METHODS)]).into_response()
}
