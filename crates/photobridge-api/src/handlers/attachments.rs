//! Attachment creation from pasted photo links.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use photobridge_core::{encode_reference, extract_asset_id_from_link, Asset};
use photobridge_immich::ensure_asset_in_album;

use super::{require_user, valid_asset_id};
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateAttachmentRequest {
    /// A share URL, `immich://` URI, or `immich:` reference.
    pub link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttachmentResponse {
    /// Persisted reference, `immich:{assetId}`.
    pub reference: String,
    pub asset_id: String,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
}

/// Resolve a pasted link to an attachment reference.
///
/// Asset metadata is best effort: a failed lookup still yields the
/// reference. The asset is bound to the configured album in the background
/// and binding failures never fail the request.
pub async fn create_attachment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAttachmentRequest>,
) -> Result<Json<CreateAttachmentResponse>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let client = state.require_client()?;

    let asset_id = extract_asset_id_from_link(&req.link, &state.config)
        .filter(|id| valid_asset_id(id))
        .ok_or_else(|| ApiError::BadRequest("link is not an immich asset".to_string()))?;

    let asset = match client.get_asset_info(&asset_id).await {
        Ok(asset) => asset,
        Err(e) => {
            warn!(
                subsystem = "api",
                component = "attachments",
                asset_id = %asset_id,
                error = %e,
                "Asset lookup failed, creating reference without metadata"
            );
            Asset {
                id: asset_id.clone(),
                ..Default::default()
            }
        }
    };

    let binder = client.clone();
    let bind_id = asset_id.clone();
    tokio::spawn(async move {
        if let Err(e) = ensure_asset_in_album(&binder, &bind_id).await {
            warn!(
                subsystem = "api",
                component = "attachments",
                asset_id = %bind_id,
                error = %e,
                "Album binding failed"
            );
        }
    });

    debug!(
        subsystem = "api",
        component = "attachments",
        user = %user.name,
        asset_id = %asset_id,
        "Attachment reference created"
    );

    Ok(Json(CreateAttachmentResponse {
        reference: encode_reference(&asset_id),
        asset_id,
        filename: asset.original_file_name,
        mime_type: asset.original_mime_type,
        size: asset.file_size_in_bytes,
    }))
}
