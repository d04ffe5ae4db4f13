//! Logical operations against one photo service deployment.
//!
//! Every operation turns into an ordered candidate list (see
//! [`crate::endpoints`]), is executed by [`probe`], and the winning body is
//! normalized into canonical models. The client holds only the immutable
//! config and a shared transport, so one instance serves unbounded
//! concurrent callers.

use std::sync::Arc;

use tracing::{debug, instrument};

use photobridge_core::{
    Album, Asset, AssetSize, Error, ImmichConfig, Result, SearchAssetsRequest, SearchResult,
};

use crate::endpoints;
use crate::normalize;
use crate::prober::probe;
use crate::proxy::{fetch_candidate, ForwardHeaders};
use crate::transport::{HttpTransport, Transport};

/// Compatibility client for one deployment.
#[derive(Clone)]
pub struct ImmichClient {
    config: Arc<ImmichConfig>,
    transport: Arc<dyn Transport>,
}

impl ImmichClient {
    /// Create a client with its own HTTP transport.
    ///
    /// Fails with [`Error::Config`] when the integration is not enabled.
    pub fn new(config: ImmichConfig) -> Result<Self> {
        if !config.enabled() {
            return Err(Error::Config(
                "Photo service URL and API key must both be set".to_string(),
            ));
        }
        let transport = HttpTransport::new(&config)?;
        debug!(
            subsystem = "immich",
            component = "client",
            api_base = transport.api_base(),
            timeout_secs = config.timeout.as_secs(),
            "Initializing photo service client"
        );
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an injected transport.
    pub fn with_transport(config: ImmichConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ImmichConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Look up a single asset's metadata.
    ///
    /// An asset record without a recoverable identifier inherits `asset_id`.
    #[instrument(skip(self), fields(subsystem = "immich", op = "get_asset_info"))]
    pub async fn get_asset_info(&self, asset_id: &str) -> Result<Asset> {
        let body = probe(self.transport(), "get_asset_info", &endpoints::asset_info(asset_id))
            .await?;
        let mut asset = normalize::decode_asset(&body)?;
        if asset.id.is_empty() {
            asset.id = asset_id.to_string();
        }
        Ok(asset)
    }

    #[instrument(skip(self), fields(subsystem = "immich", op = "list_albums"))]
    pub async fn list_albums(&self) -> Result<Vec<Album>> {
        let body = probe(self.transport(), "list_albums", &endpoints::list_albums()).await?;
        let albums = normalize::decode_albums(&body)?;
        debug!(result_count = albums.len(), "Listed albums");
        Ok(albums)
    }

    #[instrument(skip(self), fields(subsystem = "immich", op = "create_album"))]
    pub async fn create_album(&self, name: &str) -> Result<Album> {
        let body = probe(self.transport(), "create_album", &endpoints::create_album(name)).await?;
        normalize::decode_album(&body)
    }

    /// Add assets to an album. Empty album id or id list is a no-op.
    ///
    /// The update form (PUT) is tried first and the creation form (POST) only
    /// when the deployment rejects the verb or path as unsupported.
    #[instrument(skip(self, asset_ids), fields(subsystem = "immich", op = "add_assets_to_album", input_count = asset_ids.len()))]
    pub async fn add_assets_to_album(&self, album_id: &str, asset_ids: &[String]) -> Result<()> {
        if album_id.is_empty() || asset_ids.is_empty() {
            return Ok(());
        }
        probe(
            self.transport(),
            "add_assets_to_album",
            &endpoints::add_assets_to_album(album_id, asset_ids),
        )
        .await?;
        Ok(())
    }

    /// List assets with page-number pagination, probing every known listing
    /// path and query style.
    #[instrument(skip(self), fields(subsystem = "immich", op = "list_assets"))]
    pub async fn list_assets(&self, page: usize, size: usize, order: &str) -> Result<SearchResult> {
        let body = probe(
            self.transport(),
            "list_assets",
            &endpoints::list_assets(page, size, order),
        )
        .await?;
        let result = normalize::decode_search_result(&body)?;
        debug!(result_count = result.assets.len(), "Listed assets");
        Ok(result)
    }

    #[instrument(skip(self, request), fields(subsystem = "immich", op = "search_assets", page = request.page, size = request.size))]
    pub async fn search_assets(&self, request: &SearchAssetsRequest) -> Result<SearchResult> {
        let body = probe(
            self.transport(),
            "search_assets",
            &endpoints::search_assets(request),
        )
        .await?;
        let result = normalize::decode_search_result(&body)?;
        debug!(result_count = result.assets.len(), "Searched assets");
        Ok(result)
    }

    /// Open a byte stream for an asset.
    ///
    /// The upstream response is returned as is, whatever its status, so the
    /// caller can relay partial-content responses untouched.
    #[instrument(skip(self, forward), fields(subsystem = "immich", op = "fetch_asset", size = %size))]
    pub async fn fetch_asset(
        &self,
        asset_id: &str,
        size: AssetSize,
        forward: &ForwardHeaders,
    ) -> Result<reqwest::Response> {
        self.transport
            .open(&fetch_candidate(asset_id, size), forward)
            .await
    }
}
