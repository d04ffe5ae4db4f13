//! # photobridge-api
//!
//! HTTP surface for the photo service integration: album and asset browsing
//! for the picker, attachment creation from pasted links, and the byte proxy
//! the note frontend loads images through.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use photobridge_core::ImmichConfig;
use photobridge_immich::ImmichClient;

pub mod auth;
pub mod handlers;

pub use auth::{Authenticator, CurrentUser, TokenAuthenticator};

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ImmichConfig>,
    /// `None` when the integration is disabled.
    pub client: Option<ImmichClient>,
    pub auth: Arc<dyn Authenticator>,
}

impl AppState {
    /// Build state from a config. A disabled config yields no client.
    pub fn new(config: ImmichConfig, auth: Arc<dyn Authenticator>) -> photobridge_core::Result<Self> {
        let client = if config.enabled() {
            Some(ImmichClient::new(config.clone())?)
        } else {
            None
        };
        Ok(Self {
            config: Arc::new(config),
            client,
            auth,
        })
    }

    /// Build state over an existing client.
    pub fn with_client(client: ImmichClient, auth: Arc<dyn Authenticator>) -> Self {
        Self {
            config: Arc::new(client.config().clone()),
            client: Some(client),
            auth,
        }
    }

    pub(crate) fn require_client(&self) -> Result<&ImmichClient, ApiError> {
        self.client
            .as_ref()
            .ok_or_else(|| ApiError::BadRequest("immich is not configured".to_string()))
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route("/api/immich/albums", get(handlers::albums::list_albums))
        .route("/api/immich/assets", get(handlers::assets::list_assets))
        .route(
            "/api/immich/attachments",
            post(handlers::attachments::create_attachment),
        )
        .route("/file/immich/:asset_id", get(handlers::files::fetch_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// The photo service failed; the message is for the caller, the cause for
    /// the log.
    BadGateway(String, photobridge_core::Error),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(..) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::BadGateway(msg, cause) => {
                warn!(
                    subsystem = "api",
                    error = %cause,
                    status = cause.status(),
                    "{}", msg
                );
                msg
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
