//! Canonical in-memory models.
//!
//! Values are materialized per request from whatever envelope the upstream
//! deployment returned and are never mutated after construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A photo or video asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Canonical identifier, leading `/` characters stripped.
    pub id: String,
    pub original_file_name: String,
    pub original_mime_type: String,
    pub file_size_in_bytes: i64,
    /// Upstream asset kind, e.g. "IMAGE" or "VIDEO".
    #[serde(rename = "type")]
    pub asset_type: String,
}

/// An album of assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    /// First non-empty of `albumName` and `name`.
    pub display_name: String,
    pub asset_count: i64,
    pub thumbnail_asset_id: String,
}

/// One page of assets plus the cursor to the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub assets: Vec<Asset>,
    /// Next page number; zero when absent.
    pub next_page: i64,
    /// Opaque next-page token; empty when absent.
    pub next_page_token: String,
}

impl SearchResult {
    /// Normalize whichever cursor is present into a single opaque value.
    ///
    /// The token wins when both are present. `None` means no further pages.
    pub fn next_cursor(&self) -> Option<String> {
        if !self.next_page_token.is_empty() {
            return Some(self.next_page_token.clone());
        }
        if self.next_page > 0 {
            return Some(self.next_page.to_string());
        }
        None
    }
}

/// Body sent to the metadata search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAssetsRequest {
    pub page: usize,
    pub size: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub album_ids: Vec<String>,
}

/// Size class for fetched asset bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetSize {
    #[default]
    Thumbnail,
    Preview,
    Fullsize,
    /// Unmodified original file.
    Original,
}

impl AssetSize {
    /// Value of the upstream `size` query parameter, `None` for originals.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Self::Thumbnail => Some("thumbnail"),
            Self::Preview => Some("preview"),
            Self::Fullsize => Some("fullsize"),
            Self::Original => None,
        }
    }
}

impl FromStr for AssetSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "thumbnail" => Ok(Self::Thumbnail),
            "preview" => Ok(Self::Preview),
            "fullsize" => Ok(Self::Fullsize),
            "original" => Ok(Self::Original),
            _ => Err(Error::InvalidInput(format!("Unknown asset size: {}", s))),
        }
    }
}

impl fmt::Display for AssetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value().unwrap_or("original"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cursor_prefers_token() {
        let result = SearchResult {
            next_page: 3,
            next_page_token: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(result.next_cursor().as_deref(), Some("abc"));
    }

    #[test]
    fn test_next_cursor_falls_back_to_page() {
        let result = SearchResult {
            next_page: 2,
            ..Default::default()
        };
        assert_eq!(result.next_cursor().as_deref(), Some("2"));
        assert_eq!(SearchResult::default().next_cursor(), None);
    }

    #[test]
    fn test_search_request_omits_empty_fields() {
        let body = serde_json::to_value(SearchAssetsRequest {
            page: 1,
            size: 60,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"page": 1, "size": 60}));

        let body = serde_json::to_value(SearchAssetsRequest {
            page: 2,
            size: 10,
            order: "desc".to_string(),
            album_ids: vec!["a".to_string()],
        })
        .unwrap();
        assert_eq!(body["order"], "desc");
        assert_eq!(body["albumIds"], serde_json::json!(["a"]));
    }

    #[test]
    fn test_asset_size_parsing() {
        assert_eq!("".parse::<AssetSize>().unwrap(), AssetSize::Thumbnail);
        assert_eq!("Preview".parse::<AssetSize>().unwrap(), AssetSize::Preview);
        assert_eq!("fullsize".parse::<AssetSize>().unwrap(), AssetSize::Fullsize);
        assert_eq!("original".parse::<AssetSize>().unwrap(), AssetSize::Original);
        assert!("huge".parse::<AssetSize>().is_err());
        assert_eq!(AssetSize::Original.query_value(), None);
        assert_eq!(AssetSize::Preview.to_string(), "preview");
    }
}
