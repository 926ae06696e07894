//! Shared-secret extractor for server-to-server endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use maru_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Marker extractor proving the caller presented the internal API key.
///
/// Producer endpoints (such as notification creation) are not user-facing;
/// they authenticate with a shared secret in the `x-api-key` header rather
/// than a user token. When no key is configured the endpoints are disabled
/// and every call is rejected.
#[derive(Debug, Clone, Copy)]
pub struct InternalService;

impl FromRequestParts<AppState> for InternalService {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.internal_api_key.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Internal endpoints are disabled".into(),
            ))
        })?;

        let presented = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-api-key header".into()))
            })?;

        if presented != expected {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(InternalService)
    }
}
