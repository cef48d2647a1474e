//! Centralized default constants for shelfmark.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers; environment variables override most of them at startup.

// =============================================================================
// PAGINATION
// =============================================================================

/// Default (1-indexed) page for list endpoints.
pub const PAGE: i64 = 1;

/// Default page size for list endpoints.
pub const PAGE_LIMIT: i64 = 10;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

// =============================================================================
// ACTRESS NAMES
// =============================================================================

/// Number of distinct stored actress names scanned when canonicalizing input.
pub const ACTRESS_SAMPLE_LIMIT: i64 = 500;

// =============================================================================
// TITLE RESOLUTION
// =============================================================================

/// Per-request timeout for fetching a page to resolve its title (seconds).
pub const TITLE_FETCH_TIMEOUT_SECS: u64 = 10;

/// Largest HTML body the resolver will read (bytes).
pub const MAX_HTML_BYTES: u64 = 5 * 1024 * 1024;

/// Browser User-Agent sent with title fetches.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Class marking the content title on archive-style pages.
pub const ARCHIVE_TITLE_CLASS: &str = "archive-title";

// =============================================================================
// BULK TITLE SYNC
// =============================================================================

/// Pause after every resolution attempt during a bulk sync (milliseconds).
pub const SYNC_DELAY_MS: u64 = 500;

/// Substring marking a stored title as "still looks like a URL".
pub const UNRESOLVED_TITLE_MARKER: &str = "http";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Maximum accepted request body size (bytes).
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

/// CORS origins allowed when `ALLOWED_ORIGINS` is unset (comma-separated).
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

// =============================================================================
// DATABASE
// =============================================================================

/// Default database URL when `DATABASE_URL` is unset.
pub const DATABASE_URL: &str = "postgres://localhost/shelfmark";

/// Default upper bound on pooled database connections.
pub const DB_MAX_CONNECTIONS: u32 = 5;
