//! Album binder: idempotent "asset is a member of album".
//!
//! The target album is the configured album id when set; otherwise the first
//! album whose display name equals the configured name (case-insensitively),
//! created when none matches. Membership-add goes through the client's
//! PUT-then-POST probing. Running the operation again for the same asset
//! finds the same album and re-adds harmlessly, so no duplicate album is
//! ever created by a repeat call.

use tracing::{debug, info, instrument};

use photobridge_core::{is_uuid_like, Error, Result};

use crate::client::ImmichClient;

/// Ensure `asset_id` is a member of the configured album.
///
/// Succeeds without any request when the asset id is empty or not
/// UUID-shaped, the integration is disabled, or no album target is
/// configured. Listing and creation failures are returned to the caller.
#[instrument(skip(client), fields(subsystem = "immich", component = "binder", op = "ensure_asset_in_album"))]
pub async fn ensure_asset_in_album(client: &ImmichClient, asset_id: &str) -> Result<()> {
    let asset_id = asset_id.trim_start_matches('/');
    let config = client.config();
    if asset_id.is_empty()
        || !is_uuid_like(asset_id)
        || !config.enabled()
        || !config.has_album_target()
    {
        debug!("Album binding skipped");
        return Ok(());
    }

    let album_id = resolve_album(client).await?;
    client
        .add_assets_to_album(&album_id, &[asset_id.to_string()])
        .await?;
    debug!(album_id = %album_id, "Asset bound to album");
    Ok(())
}

/// Resolve the configured album to an identifier, creating it if needed.
pub async fn resolve_album(client: &ImmichClient) -> Result<String> {
    let config = client.config();
    if !config.album_id.is_empty() {
        return Ok(config.album_id.clone());
    }

    let albums = client.list_albums().await?;
    if let Some(album) = albums
        .iter()
        .filter(|album| !album.id.is_empty())
        .find(|album| album.display_name.to_lowercase() == config.album_name.to_lowercase())
    {
        debug!(album_id = %album.id, "Matched album by name");
        return Ok(album.id.clone());
    }

    let created = client.create_album(&config.album_name).await?;
    if created.id.is_empty() {
        return Err(Error::Decode(format!(
            "Created album '{}' has no identifier",
            config.album_name
        )));
    }
    info!(
        subsystem = "immich",
        component = "binder",
        album_id = %created.id,
        album_name = %config.album_name,
        "Created album"
    );
    Ok(created.id)
}
