//! # photobridge-immich
//!
//! Compatibility client for Immich photo service deployments.
//!
//! Deployments expose logically identical operations under different paths,
//! verbs, query styles and JSON envelopes. This crate provides:
//! - A [`Transport`] seam with a `reqwest` implementation
//! - The endpoint [`prober`], trying candidate requests in order
//! - The response [`normalize`]r, mapping any known envelope onto the
//!   canonical models
//! - [`ImmichClient`] logical operations built from the two
//! - The album [`binder`], an idempotent "asset is in album" operation
//! - The upstream half of the fetch [`proxy`]
//!
//! # Example
//!
//! ```rust,no_run
//! use photobridge_core::ImmichConfig;
//! use photobridge_immich::{ensure_asset_in_album, ImmichClient};
//!
//! #[tokio::main]
//! async fn main() -> photobridge_core::Result<()> {
//!     let client = ImmichClient::new(ImmichConfig::from_env()?)?;
//!     for album in client.list_albums().await? {
//!         println!("{} ({})", album.display_name, album.asset_count);
//!     }
//!     ensure_asset_in_album(&client, "550e8400-e29b-41d4-a716-446655440000").await
//! }
//! ```

pub mod binder;
pub mod client;
pub mod endpoints;
pub mod normalize;
pub mod prober;
pub mod proxy;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use binder::{ensure_asset_in_album, resolve_album};
pub use client::ImmichClient;
pub use prober::{probe, Attempt};
pub use proxy::{ForwardHeaders, PASSTHROUGH_HEADERS};
pub use transport::{api_base_url, Candidate, HttpTransport, Transport};
