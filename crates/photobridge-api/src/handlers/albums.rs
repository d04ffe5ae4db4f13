//! Album listing for the picker.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use photobridge_core::Album;

use super::require_user;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: String,
    pub name: String,
    pub asset_count: i64,
    pub thumbnail_asset_id: String,
}

impl From<Album> for AlbumSummary {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            name: album.display_name,
            asset_count: album.asset_count,
            thumbnail_asset_id: album.thumbnail_asset_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListAlbumsResponse {
    pub albums: Vec<AlbumSummary>,
}

/// List the deployment's albums.
///
/// # Returns
/// - 200 OK with `{"albums": [...]}`
/// - 400 Bad Request if the integration is not configured
/// - 401 Unauthorized without a current user
/// - 502 Bad Gateway if the photo service fails
pub async fn list_albums(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListAlbumsResponse>, ApiError> {
    require_user(&state, &headers).await?;
    let client = state.require_client()?;

    let albums = client
        .list_albums()
        .await
        .map_err(|e| ApiError::BadGateway("failed to fetch immich albums".to_string(), e))?;

    Ok(Json(ListAlbumsResponse {
        albums: albums.into_iter().map(AlbumSummary::from).collect(),
    }))
}
