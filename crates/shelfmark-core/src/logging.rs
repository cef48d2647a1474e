//! Structured logging field name constants for shelfmark.
//!
//! All crates use these names for structured `tracing` fields so log
//! queries work the same way across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied (e.g. title = URL) |
//! | INFO  | Lifecycle events, batch completions |
//! | DEBUG | Decision points, per-bookmark sync outcomes |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "db", "fetch", "sync"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "resolver", "actress_canonicalizer", "bookmarks", "pool", "title_sync"
pub const COMPONENT: &str = "component";

/// Logical operation name.
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Bookmark UUID being operated on.
pub const BOOKMARK_ID: &str = "bookmark_id";

/// URL being fetched or stored.
pub const URL: &str = "url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Bookmarks queued for a sync run.
pub const PENDING: &str = "pending";

/// Bookmarks updated by a sync run.
pub const UPDATED: &str = "updated";

/// Bookmarks a sync run could not resolve.
pub const FAILED: &str = "failed";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let fields = [
            SUBSYSTEM, COMPONENT, OPERATION, BOOKMARK_ID, URL, DURATION_MS, PENDING, UPDATED,
            FAILED, ERROR_MSG,
        ];
        let unique: HashSet<_> = fields.iter().collect();
        assert_eq!(unique.len(), fields.len());
    }

    #[test]
    fn test_sync_fields_match_report_keys() {
        let report = serde_json::to_value(crate::SyncReport::default()).unwrap();
        assert!(report.get(UPDATED).is_some());
        assert!(report.get(FAILED).is_some());
    }
}
