//! Core traits for shelfmark abstractions.
//!
//! These traits define the seams between business logic and the outside
//! world (storage and remote web pages), enabling pluggable backends and
//! testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// BOOKMARK REPOSITORY
// =============================================================================

/// Repository for bookmark persistence.
///
/// Tag (de)serialization happens inside implementations; callers always see
/// tags as a `Vec<String>`. Mutations that target a missing id report
/// `Ok(false)` rather than an error.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert a new bookmark, assigning `id` and `date_added`.
    async fn insert(&self, req: NewBookmark) -> Result<Bookmark>;

    /// Fetch a bookmark by ID.
    async fn fetch(&self, id: Uuid) -> Result<Option<Bookmark>>;

    /// One page of bookmarks ordered by `date_added` descending.
    async fn find_page(&self, page: PageRequest) -> Result<BookmarkPage>;

    /// Replace the stored title. Returns whether a record was updated.
    async fn update_title(&self, id: Uuid, title: &str) -> Result<bool>;

    /// Replace the stored tag list. Returns whether a record was updated.
    async fn set_tags(&self, id: Uuid, tags: &[String]) -> Result<bool>;

    /// Delete a bookmark. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Case-insensitive substring match on title, url, or actress name.
    /// A blank keyword returns every bookmark.
    async fn search(&self, keyword: &str) -> Result<Vec<Bookmark>>;

    /// Bookmarks whose actress name contains every (lower-cased) token.
    /// An empty token list returns every bookmark that has an actress name.
    async fn search_by_actress(&self, tokens: &[String]) -> Result<Vec<Bookmark>>;

    /// Distinct actress names containing every (lower-cased) token, sorted.
    async fn distinct_actresses(&self, tokens: &[String]) -> Result<Vec<String>>;

    /// Up to `limit` distinct non-null actress names, in no guaranteed order.
    async fn sample_actress_names(&self, limit: i64) -> Result<Vec<String>>;

    /// Bookmarks whose title is missing, blank, or looks like a URL.
    async fn list_unresolved(&self) -> Result<Vec<Bookmark>>;
}

// =============================================================================
// TITLE RESOLVER
// =============================================================================

/// Best-effort page title lookup.
///
/// Implementations never fail: every error path returns `url` unchanged,
/// so the result is always a usable, non-empty title for non-empty input.
#[async_trait]
pub trait TitleResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> String;
}
