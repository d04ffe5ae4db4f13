//! Upstream half of the fetch proxy.
//!
//! Asset bytes are streamed straight from the deployment. The only request
//! headers forwarded are the range headers, verbatim, so that partial-content
//! semantics (video seeking, resumable downloads) survive end to end.

use photobridge_core::AssetSize;

use crate::transport::Candidate;

/// Range headers copied from the inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardHeaders {
    pub range: Option<String>,
    pub if_range: Option<String>,
}

impl ForwardHeaders {
    pub fn new(range: Option<&str>, if_range: Option<&str>) -> Self {
        Self {
            range: range.filter(|v| !v.is_empty()).map(str::to_string),
            if_range: if_range.filter(|v| !v.is_empty()).map(str::to_string),
        }
    }

    /// Header name/value pairs to set on the upstream request.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("Range", &self.range), ("If-Range", &self.if_range)]
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }
}

/// Response headers passed back to the inbound client.
pub const PASSTHROUGH_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "content-range",
    "accept-ranges",
    "etag",
    "last-modified",
    "cache-control",
    "content-disposition",
];

/// Request for an asset's bytes.
///
/// Originals come from `/assets/{id}/original`; every other size class from
/// `/assets/{id}/thumbnail?size=...`.
pub fn fetch_candidate(asset_id: &str, size: AssetSize) -> Candidate {
    match size.query_value() {
        None => Candidate::get(format!("/assets/{}/original", asset_id)),
        Some(value) => Candidate::get(format!("/assets/{}/thumbnail", asset_id))
            .with_query(vec![("size".to_string(), value.to_string())]),
    }
}
