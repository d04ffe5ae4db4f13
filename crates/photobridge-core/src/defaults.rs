//! Centralized default constants for photobridge.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Environment variable holding the photo service base URL.
pub const ENV_BASE_URL: &str = "MEMOS_IMMICH_URL";

/// Environment variable holding the photo service API key.
pub const ENV_API_KEY: &str = "MEMOS_IMMICH_API_KEY";

/// Environment variable naming the album new attachments are filed into.
pub const ENV_ALBUM_NAME: &str = "MEMOS_IMMICH_ALBUM_NAME";

/// Environment variable holding an explicit album identifier.
pub const ENV_ALBUM_ID: &str = "MEMOS_IMMICH_ALBUM_ID";

/// Environment variable overriding the upstream request timeout.
pub const ENV_TIMEOUT_SECS: &str = "MEMOS_IMMICH_TIMEOUT_SECS";

/// Album name used when `MEMOS_IMMICH_ALBUM_NAME` is absent.
pub const ALBUM_NAME: &str = "Memos";

/// Upstream request timeout (seconds).
pub const TIMEOUT_SECS: u64 = 30;

// =============================================================================
// WIRE CONTRACT
// =============================================================================

/// Header carrying the API key on every upstream request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path suffix appended to the base URL to reach the API root.
pub const API_PATH_SUFFIX: &str = "/api";

/// Prefix of a persisted attachment reference.
pub const REFERENCE_PREFIX: &str = "immich:";

/// URI scheme form accepted when extracting identifiers from pasted links.
pub const URI_SCHEME_PREFIX: &str = "immich://";

/// Maximum bytes of an upstream error body kept for diagnostics.
pub const UPSTREAM_ERROR_BODY_LIMIT: usize = 1024;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for the asset picker.
pub const PAGE_SIZE: usize = 60;

/// First page number.
pub const FIRST_PAGE: usize = 1;

/// Sort order requested when the picker lists assets.
pub const SORT_ORDER: &str = "desc";
