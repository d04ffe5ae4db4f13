//! # photobridge-core
//!
//! Core types for referencing photos held by an external photo-management
//! service from note attachments.
//!
//! This crate provides the connection settings, the canonical asset and
//! album models, the shared error type, and the attachment reference codec
//! that the client and API crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod reference;

// Re-export commonly used types at crate root
pub use config::ImmichConfig;
pub use error::{Error, Result};
pub use models::{Album, Asset, AssetSize, SearchAssetsRequest, SearchResult};
pub use reference::{
    decode_reference, encode_reference, extract_asset_id_from_link, find_uuid, is_uuid_like,
};
