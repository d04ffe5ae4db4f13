//! Byte proxy for asset images and downloads.
//!
//! The frontend never talks to the photo service directly: it loads
//! `/file/immich/{id}` and the bytes are streamed through with the upstream
//! status and content headers preserved, so range requests keep working.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use serde::Deserialize;

use photobridge_core::AssetSize;
use photobridge_immich::{ForwardHeaders, PASSTHROUGH_HEADERS};

use super::{require_user, valid_asset_id};
use crate::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    pub size: Option<String>,
    pub download: Option<String>,
}

impl FileQuery {
    /// `download` forces the original regardless of `size`.
    fn asset_size(&self) -> Result<AssetSize, ApiError> {
        if matches!(self.download.as_deref(), Some("1" | "true")) {
            return Ok(AssetSize::Original);
        }
        self.size
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|e: photobridge_core::Error| ApiError::BadRequest(e.to_string()))
    }
}

/// Stream an asset's bytes from the photo service.
///
/// # Returns
/// - The upstream status (200, 206, 404, ...) with its content headers
/// - 400 Bad Request for a malformed id or unknown size
/// - 502 Bad Gateway if the photo service cannot be reached
pub async fn fetch_file(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Query(query): Query<FileQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    require_user(&state, &headers).await?;
    let client = state.require_client()?;

    if !valid_asset_id(&asset_id) {
        return Err(ApiError::BadRequest("invalid asset id".to_string()));
    }
    let size = query.asset_size()?;

    let forward = ForwardHeaders::new(
        header_str(&headers, header::RANGE),
        header_str(&headers, header::IF_RANGE),
    );
    let upstream = client
        .fetch_asset(&asset_id, size, &forward)
        .await
        .map_err(|e| ApiError::BadGateway("failed to fetch immich asset".to_string(), e))?;

    let mut builder = Response::builder().status(upstream.status());
    for name in PASSTHROUGH_HEADERS {
        if let Some(value) = upstream.headers().get(*name) {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_bytes(value.as_bytes()),
            ) {
                builder = builder.header(name, value);
            }
        }
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::Internal(format!("failed to build response: {}", e)))
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
