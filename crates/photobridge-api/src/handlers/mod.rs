//! HTTP handlers for photobridge-api.

pub mod albums;
pub mod assets;
pub mod attachments;
pub mod files;
pub mod health;

use axum::http::HeaderMap;
use tracing::error;

use crate::{ApiError, AppState, CurrentUser};

/// Resolve the caller or reject the request with 401.
pub(crate) async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<CurrentUser, ApiError> {
    match state.auth.current_user(headers).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ApiError::Unauthorized("user not found".to_string())),
        Err(e) => {
            error!(subsystem = "api", component = "auth", error = %e, "Current user lookup failed");
            Err(ApiError::Internal("failed to get current user".to_string()))
        }
    }
}

/// Asset identifiers are spliced into upstream paths, so only plain
/// identifier characters are accepted.
pub(crate) fn valid_asset_id(asset_id: &str) -> bool {
    !asset_id.is_empty()
        && asset_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
