//! Data models for shelfmark.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// BOOKMARK TYPES
// =============================================================================

/// One saved link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub url: String,
    pub title: Option<String>,
    /// Distinct, non-empty tags in insertion order.
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actress_name: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl Bookmark {
    /// Whether the stored title still needs resolving: missing, blank, or
    /// itself looking like a URL.
    pub fn is_title_unresolved(&self) -> bool {
        match self.title.as_deref() {
            None => true,
            Some(title) => {
                title.trim().is_empty() || title.contains(defaults::UNRESOLVED_TITLE_MARKER)
            }
        }
    }
}

/// A fully prepared record ready for insertion.
///
/// By the time a `NewBookmark` exists the title is resolved, tags are
/// normalized, and the actress name is canonicalized.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub url: String,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub actress_name: Option<String>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Normalized page request (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: defaults::PAGE,
            limit: defaults::PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request, replacing missing or non-positive values with
    /// the defaults and capping the limit at [`defaults::MAX_PAGE_LIMIT`].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(defaults::PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(defaults::PAGE_LIMIT)
            .min(defaults::MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.limit - 1) / self.limit
    }
}

/// One page of bookmarks, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
}

impl BookmarkPage {
    pub fn new(items: Vec<Bookmark>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            total_pages: request.total_pages(total),
            page: request.page,
            limit: request.limit,
        }
    }
}

// =============================================================================
// BULK SYNC
// =============================================================================

/// Tally returned by a bulk title sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SyncReport {
    pub updated: u32,
    pub failed: u32,
}
