//! Admin bearer-token guard

use super::{error::ApiError, routes::AppState};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use subtle::ConstantTimeEq;

/// Extractor that only succeeds for requests carrying the admin token.
///
/// With no token configured every request passes (development mode).
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        verify_admin_token(&parts.headers, state.admin_token.as_deref())?;
        Ok(AdminGuard)
    }
}

/// Check `Authorization: Bearer <token>` in constant time
pub fn verify_admin_token(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
        .trim();

    let token_bytes = token.as_bytes();
    let expected_bytes = expected.as_bytes();
    if token_bytes.len() != expected_bytes.len()
        || token_bytes.ct_eq(expected_bytes).unwrap_u8() != 1
    {
        tracing::warn!("Rejected admin request with invalid token");
        return Err(ApiError::unauthorized());
    }
    Ok(())
}
