//! Attachment reference codec.
//!
//! An attachment links to an external asset through a persisted string of
//! the form `immich:<assetId>`. This module encodes and decodes that form and
//! recovers asset identifiers from arbitrary pasted links.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::ImmichConfig;
use crate::defaults::{REFERENCE_PREFIX, URI_SCHEME_PREFIX};

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}",
    )
    .expect("UUID pattern is a valid regex")
});

/// First UUID-shaped substring of `text`, if any.
pub fn find_uuid(text: &str) -> Option<&str> {
    UUID_PATTERN.find(text).map(|m| m.as_str())
}

/// True when `text` contains a UUID-shaped substring.
pub fn is_uuid_like(text: &str) -> bool {
    UUID_PATTERN.is_match(text)
}

/// Encode an asset identifier as a persisted reference.
pub fn encode_reference(asset_id: &str) -> String {
    format!("{}{}", REFERENCE_PREFIX, asset_id)
}

/// Decode a persisted reference back into its asset identifier.
///
/// Returns `None` for strings without the prefix or with an empty remainder.
pub fn decode_reference(reference: &str) -> Option<&str> {
    let rest = reference.strip_prefix(REFERENCE_PREFIX)?;
    non_empty(rest.trim_start_matches('/'))
}

/// Recover an asset identifier from user-pasted text.
///
/// Tried in order: the `immich:` reference form, the `immich://` URI form,
/// then a generic URL. For URLs the host must match the configured base host
/// (when one is configured) and the identifier is the first UUID-shaped
/// substring of the path, else of any query value.
pub fn extract_asset_id_from_link(link: &str, config: &ImmichConfig) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    if let Some(rest) = link.strip_prefix(URI_SCHEME_PREFIX) {
        return non_empty(rest.trim_start_matches('/')).map(str::to_string);
    }
    if link.starts_with(REFERENCE_PREFIX) {
        return decode_reference(link).map(str::to_string);
    }

    let parsed = Url::parse(link).ok()?;
    let host = parsed.host_str()?;
    if !config.base_url.is_empty() {
        let base = Url::parse(&config.base_url).ok()?;
        let base_host = base.host_str()?;
        if !host.eq_ignore_ascii_case(base_host) || parsed.port() != base.port() {
            return None;
        }
    }

    if let Some(id) = find_uuid(parsed.path()) {
        return Some(id.to_string());
    }
    parsed
        .query_pairs()
        .find_map(|(_, value)| find_uuid(&value).map(str::to_string))
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn config(base_url: &str) -> ImmichConfig {
        ImmichConfig::new(base_url, "key").unwrap()
    }

    #[test]
    fn test_encode_then_decode() {
        let reference = encode_reference(ID);
        assert_eq!(reference, format!("immich:{}", ID));
        assert_eq!(decode_reference(&reference), Some(ID));
    }

    #[test]
    fn test_decode_reference() {
        assert_eq!(decode_reference("immich:1234"), Some("1234"));
        assert_eq!(decode_reference("immich:/1234"), Some("1234"));
        assert_eq!(decode_reference("immich:"), None);
        assert_eq!(decode_reference("not-a-ref"), None);
        assert_eq!(decode_reference("IMMICH:1234"), None);
    }

    #[test]
    fn test_extract_reference_and_uri_forms() {
        let cfg = config("https://photos.example");
        assert_eq!(
            extract_asset_id_from_link("immich:abc", &cfg).as_deref(),
            Some("abc")
        );
        assert_eq!(
            extract_asset_id_from_link("  immich://abc  ", &cfg).as_deref(),
            Some("abc")
        );
        assert_eq!(
            extract_asset_id_from_link("immich:///abc", &cfg).as_deref(),
            Some("abc")
        );
        assert_eq!(extract_asset_id_from_link("immich://", &cfg), None);
        assert_eq!(extract_asset_id_from_link("", &cfg), None);
    }

    #[test]
    fn test_extract_from_matching_host() {
        let link = format!("https://photos.example/share/{}", ID);
        assert_eq!(
            extract_asset_id_from_link(&link, &config("https://photos.example")).as_deref(),
            Some(ID)
        );
        assert_eq!(
            extract_asset_id_from_link(&link, &config("https://PHOTOS.example/api")).as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_extract_rejects_host_mismatch() {
        let link = format!("https://photos.example/share/{}", ID);
        assert_eq!(
            extract_asset_id_from_link(&link, &config("https://other.example")),
            None
        );
        assert_eq!(
            extract_asset_id_from_link(&link, &config("https://photos.example:2283")),
            None
        );
    }

    #[test]
    fn test_extract_without_configured_base_accepts_any_host() {
        let link = format!("https://anywhere.example/photos/{}", ID);
        assert_eq!(
            extract_asset_id_from_link(&link, &ImmichConfig::default()).as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_extract_from_query_value() {
        let link = format!("https://photos.example/view?x=1&asset={}", ID);
        assert_eq!(
            extract_asset_id_from_link(&link, &config("https://photos.example")).as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_extract_not_found() {
        let cfg = config("https://photos.example");
        assert_eq!(
            extract_asset_id_from_link("https://photos.example/albums", &cfg),
            None
        );
        assert_eq!(extract_asset_id_from_link("just some text", &cfg), None);
        assert_eq!(extract_asset_id_from_link("/relative/path", &cfg), None);
    }

    #[test]
    fn test_uuid_helpers() {
        assert!(is_uuid_like(ID));
        assert!(!is_uuid_like("1234"));
        // version nibble must be 1-5
        assert!(!is_uuid_like("550e8400-e29b-61d4-a716-446655440000"));
        assert_eq!(find_uuid(&format!("prefix-{}-suffix", ID)), Some(ID));
    }
}
