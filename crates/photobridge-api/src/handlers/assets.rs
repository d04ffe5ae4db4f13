//! Asset browsing for the picker.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use photobridge_core::{defaults, Asset, SearchAssetsRequest};

use super::require_user;
use crate::{ApiError, AppState};

/// Query parameters for asset browsing. Kept as raw strings so malformed
/// values fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssetsQuery {
    pub page_size: Option<String>,
    pub page_token: Option<String>,
}

impl ListAssetsQuery {
    fn page_size(&self) -> usize {
        positive(self.page_size.as_deref()).unwrap_or(defaults::PAGE_SIZE)
    }

    fn page(&self) -> usize {
        positive(self.page_token.as_deref()).unwrap_or(defaults::FIRST_PAGE)
    }
}

fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub thumbnail_url: String,
    pub preview_url: String,
}

impl From<Asset> for AssetSummary {
    fn from(asset: Asset) -> Self {
        Self {
            thumbnail_url: format!("/file/immich/{}?size=thumbnail", asset.id),
            preview_url: format!("/file/immich/{}?size=fullsize", asset.id),
            id: asset.id,
            filename: asset.original_file_name,
            mime_type: asset.original_mime_type,
            size: asset.file_size_in_bytes,
            asset_type: asset.asset_type,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssetsResponse {
    pub assets: Vec<AssetSummary>,
    /// Empty when there are no further pages.
    pub next_page_token: String,
}

/// List one page of assets, newest first.
///
/// The listing endpoints are tried first; when every listing form fails the
/// metadata search is used instead.
///
/// # Query Parameters
/// - `pageSize`: assets per page (default 60)
/// - `pageToken`: page number from a previous `nextPageToken` (default 1)
pub async fn list_assets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<ListAssetsResponse>, ApiError> {
    require_user(&state, &headers).await?;
    let client = state.require_client()?;

    let (page, size) = (query.page(), query.page_size());
    let result = match client.list_assets(page, size, defaults::SORT_ORDER).await {
        Ok(result) => result,
        Err(list_err) => {
            warn!(
                subsystem = "api",
                component = "assets",
                error = %list_err,
                page,
                size,
                "Asset listing failed, falling back to search"
            );
            let request = SearchAssetsRequest {
                page,
                size,
                order: defaults::SORT_ORDER.to_string(),
                ..Default::default()
            };
            client
                .search_assets(&request)
                .await
                .map_err(|e| ApiError::BadGateway("failed to fetch immich assets".to_string(), e))?
        }
    };

    Ok(Json(ListAssetsResponse {
        next_page_token: result.next_cursor().unwrap_or_default(),
        assets: result.assets.into_iter().map(AssetSummary::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(size: Option<&str>, token: Option<&str>) -> ListAssetsQuery {
        ListAssetsQuery {
            page_size: size.map(str::to_string),
            page_token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_for_missing_or_invalid_values() {
        let q = query(None, None);
        assert_eq!((q.page(), q.page_size()), (1, 60));

        let q = query(Some("abc"), Some("-2"));
        assert_eq!((q.page(), q.page_size()), (1, 60));

        let q = query(Some("0"), Some("0"));
        assert_eq!((q.page(), q.page_size()), (1, 60));

        let q = query(Some(" 25 "), Some("3"));
        assert_eq!((q.page(), q.page_size()), (3, 25));
    }

    #[test]
    fn test_summary_urls_route_through_proxy() {
        let summary = AssetSummary::from(Asset {
            id: "a1".to_string(),
            original_file_name: "IMG.jpg".to_string(),
            ..Default::default()
        });
        assert_eq!(summary.thumbnail_url, "/file/immich/a1?size=thumbnail");
        assert_eq!(summary.preview_url, "/file/immich/a1?size=fullsize");
        assert_eq!(summary.filename, "IMG.jpg");
    }
}
