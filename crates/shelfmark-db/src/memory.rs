//! In-process bookmark repository.
//!
//! Implements the same contract as [`PgBookmarkRepository`](crate::PgBookmarkRepository)
//! over a `Vec` behind a `tokio::sync::RwLock`. Used with
//! `STORAGE_BACKEND=memory` for throwaway instances and by the API tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shelfmark_core::{
    contains_all_tokens, new_v7, Bookmark, BookmarkPage, BookmarkRepository, Error, NewBookmark,
    PageRequest, Result,
};

/// Bookmarks kept in insertion order (oldest first).
#[derive(Clone, Default)]
pub struct MemoryBookmarkRepository {
    records: Arc<RwLock<Vec<Bookmark>>>,
}

impl MemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fully-formed record, keeping its `id` and `date_added`.
    pub async fn seed(&self, bookmark: Bookmark) {
        self.records.write().await.push(bookmark);
    }

    /// Number of stored bookmarks.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Newest first; ties keep the later-inserted record first.
fn newest_first(records: &[Bookmark]) -> Vec<Bookmark> {
    let mut sorted: Vec<Bookmark> = records.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    sorted
}

fn matches_keyword(bookmark: &Bookmark, keyword: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(keyword);
    bookmark.title.as_deref().is_some_and(hit)
        || hit(&bookmark.url)
        || bookmark.actress_name.as_deref().is_some_and(hit)
}

#[async_trait]
impl BookmarkRepository for MemoryBookmarkRepository {
    async fn insert(&self, req: NewBookmark) -> Result<Bookmark> {
        if req.url.trim().is_empty() {
            return Err(Error::InvalidInput("url is required".to_string()));
        }

        let bookmark = Bookmark {
            id: new_v7(),
            url: req.url,
            title: req.title,
            tags: req.tags,
            actress_name: req.actress_name,
            date_added: Utc::now(),
        };
        self.records.write().await.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Bookmark>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|b| b.id == id).cloned())
    }

    async fn find_page(&self, page: PageRequest) -> Result<BookmarkPage> {
        let records = self.records.read().await;
        let total = records.len() as i64;
        let items = newest_first(&records)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok(BookmarkPage::new(items, total, page))
    }

    async fn update_title(&self, id: Uuid, title: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|b| b.id == id) {
            Some(bookmark) => {
                bookmark.title = Some(title.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_tags(&self, id: Uuid, tags: &[String]) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|b| b.id == id) {
            Some(bookmark) => {
                bookmark.tags = tags.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|b| b.id != id);
        Ok(records.len() < before)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Bookmark>> {
        let keyword = keyword.trim().to_lowercase();
        let records = self.records.read().await;
        Ok(newest_first(&records)
            .into_iter()
            .filter(|b| keyword.is_empty() || matches_keyword(b, &keyword))
            .collect())
    }

    async fn search_by_actress(&self, tokens: &[String]) -> Result<Vec<Bookmark>> {
        let records = self.records.read().await;
        Ok(newest_first(&records)
            .into_iter()
            .filter(|b| {
                b.actress_name
                    .as_deref()
                    .is_some_and(|name| contains_all_tokens(name, tokens))
            })
            .collect())
    }

    async fn distinct_actresses(&self, tokens: &[String]) -> Result<Vec<String>> {
        let records = self.records.read().await;
        let mut names: Vec<String> = records
            .iter()
            .filter_map(|b| b.actress_name.clone())
            .filter(|name| contains_all_tokens(name, tokens))
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn sample_actress_names(&self, limit: i64) -> Result<Vec<String>> {
        let records = self.records.read().await;
        let mut names: Vec<String> = Vec::new();
        for name in records.iter().filter_map(|b| b.actress_name.as_ref()) {
            if names.len() as i64 >= limit {
                break;
            }
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    async fn list_unresolved(&self) -> Result<Vec<Bookmark>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|b| b.is_title_unresolved())
            .cloned()
            .collect())
    }
}
