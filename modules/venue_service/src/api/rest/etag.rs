//! Version tokens for list endpoints
//!
//! The token is the xxh3 hash of the serialized body, sent as a strong
//! `ETag`. A request whose `If-None-Match` carries the current token gets
//! `304 Not Modified` with no body.

use super::error::ApiError;
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

/// Quoted version token for a body
pub fn version_token(body: &[u8]) -> String {
    format!("\"{:016x}\"", xxh3_64(body))
}

/// Whether an `If-None-Match` header matches `token`
fn matches(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == token)
}

/// Serialize `body` as JSON with an `ETag`, or answer 304 when the client
/// already holds this version
pub fn versioned_json<T: Serialize>(headers: &HeaderMap, body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize response body");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode response")
    })?;
    let token = version_token(&bytes);
    let etag = HeaderValue::from_str(&token)
        .map_err(|_| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Invalid version token"))?;

    if matches(headers, &token) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        StatusCode::OK,
        [
            (header::ETAG, etag),
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
        ],
        bytes,
    )
        .into_response())
}
