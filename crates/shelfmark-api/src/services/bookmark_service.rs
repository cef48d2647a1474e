//! Bookmark creation, listing, search, and tagging.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shelfmark_core::{
    merge_tags, normalize_tags, Bookmark, BookmarkPage, BookmarkRepository, Error, NewBookmark,
    PageRequest, Result, TagCasePolicy, TitleResolver,
};

use super::ActressCanonicalizer;

/// Input for [`BookmarkService::create`], already shaped by the API layer.
#[derive(Debug, Clone, Default)]
pub struct CreateBookmark {
    pub url: String,
    pub tags: Vec<String>,
    pub actress_name: Option<String>,
    /// When non-blank, used as-is and title resolution is skipped.
    pub title: Option<String>,
}

/// Bookmark operations behind the `/api/bookmarks` routes.
#[derive(Clone)]
pub struct BookmarkService {
    repo: Arc<dyn BookmarkRepository>,
    resolver: Arc<dyn TitleResolver>,
    canonicalizer: ActressCanonicalizer,
    tag_policy: TagCasePolicy,
}

impl BookmarkService {
    pub fn new(
        repo: Arc<dyn BookmarkRepository>,
        resolver: Arc<dyn TitleResolver>,
        canonicalizer: ActressCanonicalizer,
        tag_policy: TagCasePolicy,
    ) -> Self {
        Self {
            repo,
            resolver,
            canonicalizer,
            tag_policy,
        }
    }

    /// Resolve the title (unless given), normalize tags, canonicalize the
    /// actress name, and persist.
    pub async fn create(&self, req: CreateBookmark) -> Result<Bookmark> {
        let url = req.url.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("url is required".to_string()));
        }

        let title = match req.title.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => self.resolver.resolve(url).await,
        };

        let actress_name = match req.actress_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(self.canonicalizer.canonicalize(name).await),
            _ => None,
        };

        let bookmark = self
            .repo
            .insert(NewBookmark {
                url: url.to_string(),
                title: Some(title),
                tags: normalize_tags(&req.tags, self.tag_policy),
                actress_name,
            })
            .await?;

        info!(
            subsystem = "api",
            component = "bookmarks",
            op = "create",
            bookmark_id = %bookmark.id,
            url = %bookmark.url,
            tag_count = bookmark.tags.len(),
            "Bookmark created"
        );
        Ok(bookmark)
    }

    /// One page, newest first.
    pub async fn list(&self, page: PageRequest) -> Result<BookmarkPage> {
        self.repo.find_page(page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Bookmark>> {
        self.repo.fetch(id).await
    }

    /// Delete by id. Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let removed = self.repo.delete(id).await?;
        debug!(
            subsystem = "api",
            component = "bookmarks",
            op = "delete",
            bookmark_id = %id,
            removed,
            "Bookmark delete"
        );
        Ok(())
    }

    /// Case-insensitive substring match on title, url, or actress name.
    /// A blank keyword returns every bookmark.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Bookmark>> {
        self.repo.search(keyword).await
    }

    /// Union `tags` into the bookmark's tag set.
    ///
    /// No-op when the cleaned input is empty or the bookmark does not exist.
    pub async fn add_tags(&self, id: Uuid, tags: &[String]) -> Result<()> {
        let incoming = normalize_tags(tags, self.tag_policy);
        if incoming.is_empty() {
            return Ok(());
        }

        let Some(bookmark) = self.repo.fetch(id).await? else {
            debug!(
                subsystem = "api",
                component = "bookmarks",
                op = "add_tags",
                bookmark_id = %id,
                "Bookmark not found, ignoring tags"
            );
            return Ok(());
        };

        let merged = merge_tags(&bookmark.tags, &incoming, self.tag_policy);
        if merged != bookmark.tags {
            self.repo.set_tags(id, &merged).await?;
        }
        Ok(())
    }

    /// Resolve a page title without storing anything.
    pub async fn fetch_title(&self, url: &str) -> String {
        self.resolver.resolve(url.trim()).await
    }
}
