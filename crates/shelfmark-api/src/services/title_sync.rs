//! Bulk title reconciliation.
//!
//! Re-resolves every bookmark whose stored title is missing, blank, or
//! still contains `"http"`. Fetches run one at a time and every attempt is
//! followed by a fixed pause, so a batch of N bookmarks takes at least
//! N × delay and never has two outbound requests in flight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use shelfmark_core::{BookmarkRepository, Result, SyncReport, TitleResolver};

/// Sequential, paced bulk title sync.
#[derive(Clone)]
pub struct TitleSyncTask {
    repo: Arc<dyn BookmarkRepository>,
    resolver: Arc<dyn TitleResolver>,
    delay: Duration,
    /// Held for a whole run; a second caller waits for the first to finish.
    running: Arc<Mutex<()>>,
}

impl TitleSyncTask {
    pub fn new(
        repo: Arc<dyn BookmarkRepository>,
        resolver: Arc<dyn TitleResolver>,
        delay: Duration,
    ) -> Self {
        Self {
            repo,
            resolver,
            delay,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Resolve every unresolved bookmark and report the tally.
    ///
    /// Only the initial selection can fail; per-item persistence errors are
    /// counted as `failed` and the batch continues.
    pub async fn run(&self) -> Result<SyncReport> {
        let _guard = self.running.lock().await;
        let start = Instant::now();

        let pending = self.repo.list_unresolved().await?;
        info!(
            subsystem = "sync",
            component = "title_sync",
            op = "run",
            pending = pending.len(),
            delay_ms = self.delay.as_millis() as u64,
            "Title sync started"
        );

        let mut report = SyncReport::default();
        for bookmark in pending {
            let title = self.resolver.resolve(&bookmark.url).await;

            if !title.is_empty() && title != bookmark.url {
                match self.repo.update_title(bookmark.id, &title).await {
                    Ok(true) => {
                        report.updated += 1;
                        debug!(
                            subsystem = "sync",
                            component = "title_sync",
                            bookmark_id = %bookmark.id,
                            title = %title,
                            "Title updated"
                        );
                    }
                    Ok(false) => {
                        report.failed += 1;
                        debug!(
                            subsystem = "sync",
                            component = "title_sync",
                            bookmark_id = %bookmark.id,
                            "Bookmark deleted during sync"
                        );
                    }
                    Err(e) => {
                        report.failed += 1;
                        warn!(
                            subsystem = "sync",
                            component = "title_sync",
                            bookmark_id = %bookmark.id,
                            error = %e,
                            "Title update failed"
                        );
                    }
                }
            } else {
                report.failed += 1;
                debug!(
                    subsystem = "sync",
                    component = "title_sync",
                    bookmark_id = %bookmark.id,
                    url = %bookmark.url,
                    "Title unresolved"
                );
            }

            tokio::time::sleep(self.delay).await;
        }

        info!(
            subsystem = "sync",
            component = "title_sync",
            op = "run",
            updated = report.updated,
            failed = report.failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Title sync finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use shelfmark_core::{new_v7, Bookmark, BookmarkPage, Error, NewBookmark, PageRequest};
    use shelfmark_db::MemoryBookmarkRepository;
    use shelfmark_fetch::mock::MockTitleResolver;
    use uuid::Uuid;

    fn stale(url: &str, title: Option<&str>) -> Bookmark {
        Bookmark {
            id: new_v7(),
            url: url.to_string(),
            title: title.map(str::to_string),
            tags: vec![],
            actress_name: None,
            date_added: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_tallies_and_paces() {
        let repo = Arc::new(MemoryBookmarkRepository::new());
        repo.seed(stale("https://a.test", None)).await;
        repo.seed(stale("https://b.test", Some("https://b.test"))).await;
        repo.seed(stale("https://c.test", Some("  "))).await;
        repo.seed(stale("https://d.test", Some("Fine Title"))).await;

        // c.test runs into the fetch timeout and comes back as its own URL.
        let resolver = MockTitleResolver::new()
            .with_title("https://a.test", "A")
            .with_title("https://b.test", "B")
            .with_url_latency("https://c.test", Duration::from_secs(10));
        let task = TitleSyncTask::new(
            repo.clone(),
            Arc::new(resolver.clone()),
            Duration::from_millis(500),
        );

        let started = tokio::time::Instant::now();
        let report = task.run().await.unwrap();
        assert_eq!(report, SyncReport { updated: 2, failed: 1 });
        assert!(started.elapsed() >= Duration::from_millis(1500));

        let titles: Vec<Option<String>> = repo
            .search("")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert!(titles.contains(&Some("A".to_string())));
        assert!(titles.contains(&Some("B".to_string())));
        assert!(titles.contains(&Some("  ".to_string())));
        assert!(titles.contains(&Some("Fine Title".to_string())));

        let calls = resolver.calls();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            assert!(pair[1].started >= pair[0].finished + Duration::from_millis(500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_nothing_pending() {
        let repo = Arc::new(MemoryBookmarkRepository::new());
        repo.seed(stale("https://d.test", Some("Fine Title"))).await;
        let resolver = MockTitleResolver::new();
        let task = TitleSyncTask::new(repo, Arc::new(resolver.clone()), Duration::from_millis(500));

        assert_eq!(task.run().await.unwrap(), SyncReport::default());
        assert_eq!(resolver.call_count(), 0);
    }

    /// Delegates to memory but fails every title update.
    struct FailingUpdates(MemoryBookmarkRepository);

    #[async_trait]
    impl BookmarkRepository for FailingUpdates {
        async fn insert(&self, req: NewBookmark) -> Result<Bookmark> {
            self.0.insert(req).await
        }
        async fn fetch(&self, id: Uuid) -> Result<Option<Bookmark>> {
            self.0.fetch(id).await
        }
        async fn find_page(&self, page: PageRequest) -> Result<BookmarkPage> {
            self.0.find_page(page).await
        }
        async fn update_title(&self, _id: Uuid, _title: &str) -> Result<bool> {
            Err(Error::Internal("disk full".to_string()))
        }
        async fn set_tags(&self, id: Uuid, tags: &[String]) -> Result<bool> {
            self.0.set_tags(id, tags).await
        }
        async fn delete(&self, id: Uuid) -> Result<bool> {
            self.0.delete(id).await
        }
        async fn search(&self, keyword: &str) -> Result<Vec<Bookmark>> {
            self.0.search(keyword).await
        }
        async fn search_by_actress(&self, tokens: &[String]) -> Result<Vec<Bookmark>> {
            self.0.search_by_actress(tokens).await
        }
        async fn distinct_actresses(&self, tokens: &[String]) -> Result<Vec<String>> {
            self.0.distinct_actresses(tokens).await
        }
        async fn sample_actress_names(&self, limit: i64) -> Result<Vec<String>> {
            self.0.sample_actress_names(limit).await
        }
        async fn list_unresolved(&self) -> Result<Vec<Bookmark>> {
            self.0.list_unresolved().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistence_failure_counts_and_continues() {
        let memory = MemoryBookmarkRepository::new();
        memory.seed(stale("https://a.test", None)).await;
        memory.seed(stale("https://b.test", None)).await;

        let resolver = MockTitleResolver::new()
            .with_title("https://a.test", "A")
            .with_title("https://b.test", "B");
        let task = TitleSyncTask::new(
            Arc::new(FailingUpdates(memory)),
            Arc::new(resolver.clone()),
            Duration::from_millis(10),
        );

        assert_eq!(task.run().await.unwrap(), SyncReport { updated: 0, failed: 2 });
        assert_eq!(resolver.call_count(), 2);
    }
}
