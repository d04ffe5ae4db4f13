//! Connection settings for the photo service.
//!
//! Settings are read once per process from `MEMOS_IMMICH_*` environment
//! variables and never change afterwards. The integration is enabled only
//! when both the base URL and the API key are non-empty.
//!
//! # Example
//!
//! ```rust,no_run
//! use photobridge_core::ImmichConfig;
//!
//! let config = ImmichConfig::from_env().unwrap_or_default();
//! if config.enabled() {
//!     println!("photo service at {}", config.base_url);
//! }
//! ```

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::defaults;
use crate::error::{Error, Result};

/// Validated, immutable connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmichConfig {
    /// Base URL of the photo service (may or may not end in `/api`).
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Album matched by display name. Empty disables name lookup.
    pub album_name: String,
    /// Explicit album identifier. Takes precedence over `album_name`.
    pub album_id: String,
    /// Upstream request timeout.
    pub timeout: Duration,
}

impl Default for ImmichConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            album_name: String::new(),
            album_id: String::new(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
        }
    }
}

impl ImmichConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    ///
    /// Missing URL or key yields a disabled (default) config rather than an
    /// error. A URL that cannot be parsed is a [`Error::Config`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let base_url = read(defaults::ENV_BASE_URL).unwrap_or_default();
        let api_key = read(defaults::ENV_API_KEY).unwrap_or_default();
        if base_url.is_empty() || api_key.is_empty() {
            debug!(
                subsystem = "immich",
                component = "config",
                "Photo service integration disabled: URL or API key not set"
            );
            return Ok(Self::default());
        }

        validate_base_url(&base_url)?;

        // Absent means default; explicitly empty disables name matching.
        let album_name =
            read(defaults::ENV_ALBUM_NAME).unwrap_or_else(|| defaults::ALBUM_NAME.to_string());
        let album_id = read(defaults::ENV_ALBUM_ID).unwrap_or_default();
        let timeout_secs = read(defaults::ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults::TIMEOUT_SECS);

        Ok(Self {
            base_url,
            api_key,
            album_name,
            album_id,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a config directly, validating the base URL when set.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = base_url.trim().to_string();
        if !base_url.is_empty() {
            validate_base_url(&base_url)?;
        }
        Ok(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            album_name: defaults::ALBUM_NAME.to_string(),
            ..Self::default()
        })
    }

    /// Set the album matched by name.
    pub fn with_album_name(mut self, name: &str) -> Self {
        self.album_name = name.trim().to_string();
        self
    }

    /// Set an explicit album identifier.
    pub fn with_album_id(mut self, id: &str) -> Self {
        self.album_id = id.trim().to_string();
        self
    }

    /// Set the upstream request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when both base URL and API key are configured.
    pub fn enabled(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    /// True when an album target (identifier or name) is configured.
    pub fn has_album_target(&self) -> bool {
        !self.album_id.is_empty() || !self.album_name.is_empty()
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
    if parsed.host_str().is_none() {
        return Err(Error::Config(format!(
            "Base URL '{}' has no host",
            base_url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_disabled_without_url_or_key() {
        let config = ImmichConfig::from_lookup(lookup(&[(
            defaults::ENV_BASE_URL,
            "https://photos.example",
        )]))
        .unwrap();
        assert!(!config.enabled());

        let config =
            ImmichConfig::from_lookup(lookup(&[(defaults::ENV_API_KEY, "secret")])).unwrap();
        assert!(!config.enabled());
    }

    #[test]
    fn test_album_name_defaults_when_absent() {
        let config = ImmichConfig::from_lookup(lookup(&[
            (defaults::ENV_BASE_URL, " https://photos.example "),
            (defaults::ENV_API_KEY, "secret"),
        ]))
        .unwrap();
        assert!(config.enabled());
        assert_eq!(config.base_url, "https://photos.example");
        assert_eq!(config.album_name, "Memos");
        assert!(config.album_id.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(defaults::TIMEOUT_SECS));
    }

    #[test]
    fn test_explicit_empty_album_name_disables_matching() {
        let config = ImmichConfig::from_lookup(lookup(&[
            (defaults::ENV_BASE_URL, "https://photos.example"),
            (defaults::ENV_API_KEY, "secret"),
            (defaults::ENV_ALBUM_NAME, ""),
        ]))
        .unwrap();
        assert!(config.album_name.is_empty());
        assert!(!config.has_album_target());
    }

    #[test]
    fn test_album_id_and_timeout() {
        let config = ImmichConfig::from_lookup(lookup(&[
            (defaults::ENV_BASE_URL, "https://photos.example"),
            (defaults::ENV_API_KEY, "secret"),
            (defaults::ENV_ALBUM_ID, "album-1"),
            (defaults::ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.album_id, "album-1");
        assert!(config.has_album_target());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = ImmichConfig::from_lookup(lookup(&[
            (defaults::ENV_BASE_URL, "https://photos.example"),
            (defaults::ENV_API_KEY, "secret"),
            (defaults::ENV_TIMEOUT_SECS, "zero"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(defaults::TIMEOUT_SECS));
    }

    #[test]
    fn test_malformed_url_is_config_error() {
        let result = ImmichConfig::from_lookup(lookup(&[
            (defaults::ENV_BASE_URL, "not a url"),
            (defaults::ENV_API_KEY, "secret"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_new_and_builders() {
        let config = ImmichConfig::new("https://photos.example/", "key")
            .unwrap()
            .with_album_name(" Trip ")
            .with_album_id("abc");
        assert!(config.enabled());
        assert_eq!(config.album_name, "Trip");
        assert_eq!(config.album_id, "abc");

        assert!(ImmichConfig::new("::::", "key").is_err());
        assert!(!ImmichConfig::new("", "key").unwrap().enabled());
    }
}
