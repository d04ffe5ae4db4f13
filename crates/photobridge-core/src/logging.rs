//! Structured logging schema and field name constants for photobridge.
//!
//! All crates use these names for structured `tracing` fields so that log
//! queries work the same way across the client and the API server.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), album creation |
//! | DEBUG | Decision points, resolved albums, operation completions |
//! | TRACE | Per-candidate attempts |
//!
//! ## Querying
//!
//! `tracing` call sites spell field keys as literals. These constants are the
//! names to filter on downstream, for example in `LOG_FORMAT=json` output:
//!
//! ```rust
//! use photobridge_core::logging;
//!
//! let line = r#"{"level":"DEBUG","fields":{"subsystem":"immich","op":"list_albums","result_count":3}}"#;
//! let event: serde_json::Value = serde_json::from_str(line).unwrap();
//! let fields = &event["fields"];
//! assert_eq!(fields[logging::SUBSYSTEM], "immich");
//! assert_eq!(fields[logging::OPERATION], "list_albums");
//! assert_eq!(fields[logging::RESULT_COUNT], 3);
//! ```

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "immich", "api"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "prober", "binder", "proxy", "auth"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list_albums", "list_assets", "ensure_asset_in_album"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Canonical asset identifier being operated on.
pub const ASSET_ID: &str = "asset_id";

/// Album identifier being operated on.
pub const ALBUM_ID: &str = "album_id";

// ─── Probe fields ──────────────────────────────────────────────────────────

/// Physical candidate description, e.g. "GET /albums".
pub const CANDIDATE: &str = "candidate";

/// Zero-based index of the candidate being attempted.
pub const ATTEMPT: &str = "attempt";

/// Upstream HTTP status code.
pub const STATUS: &str = "status";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records returned by a listing.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
