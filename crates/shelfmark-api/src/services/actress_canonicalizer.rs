//! Actress name canonicalization and lookup.
//!
//! Two spellings are the same name when their token-set signatures match
//! (`"Doe Jane"` and `"jane  doe"` both sign as `"doe jane"`). New input is
//! compared against a bounded sample of stored names and adopts the first
//! stored spelling that matches. The bound makes this best-effort: once the
//! store holds more distinct names than the sample limit, variants of names
//! outside the sample are kept as typed.

use std::sync::Arc;

use tracing::{debug, warn};

use shelfmark_core::{name_signature, query_tokens, Bookmark, BookmarkRepository, Result};

/// Canonicalizes and searches actress names.
#[derive(Clone)]
pub struct ActressCanonicalizer {
    repo: Arc<dyn BookmarkRepository>,
    sample_limit: i64,
}

impl ActressCanonicalizer {
    pub fn new(repo: Arc<dyn BookmarkRepository>, sample_limit: i64) -> Self {
        Self { repo, sample_limit }
    }

    /// Map `name` to the stored spelling with the same token set, or return
    /// it trimmed when none is found.
    ///
    /// A failed sample read is logged and treated as "no match".
    pub async fn canonicalize(&self, name: &str) -> String {
        let input = name.trim();
        if input.is_empty() {
            return String::new();
        }

        let signature = name_signature(input);
        let sample = match self.repo.sample_actress_names(self.sample_limit).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!(
                    subsystem = "api",
                    component = "actress_canonicalizer",
                    op = "canonicalize",
                    error = %e,
                    "Name sample unavailable, keeping input spelling"
                );
                return input.to_string();
            }
        };

        match sample.into_iter().find(|stored| name_signature(stored) == signature) {
            Some(stored) => {
                if stored != input {
                    debug!(
                        subsystem = "api",
                        component = "actress_canonicalizer",
                        op = "canonicalize",
                        input = %input,
                        canonical = %stored,
                        "Adopted stored spelling"
                    );
                }
                stored
            }
            None => input.to_string(),
        }
    }

    /// Bookmarks whose actress name contains every query token, in any
    /// order, ignoring case. A blank query matches every named bookmark.
    pub async fn search_by_actress(&self, name: &str) -> Result<Vec<Bookmark>> {
        self.repo.search_by_actress(&query_tokens(name)).await
    }

    /// Distinct stored names, optionally filtered like
    /// [`search_by_actress`](Self::search_by_actress).
    pub async fn list_unique_actresses(&self, query: Option<&str>) -> Result<Vec<String>> {
        let tokens = query.map(query_tokens).unwrap_or_default();
        self.repo.distinct_actresses(&tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_core::NewBookmark;
    use shelfmark_db::MemoryBookmarkRepository;

    async fn repo_with(names: &[&str]) -> Arc<MemoryBookmarkRepository> {
        let repo = Arc::new(MemoryBookmarkRepository::new());
        for (i, name) in names.iter().enumerate() {
            repo.insert(NewBookmark {
                url: format!("https://example.com/{}", i),
                title: None,
                tags: vec![],
                actress_name: Some(name.to_string()),
            })
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_reordered_tokens_adopt_stored_spelling() {
        let canonicalizer = ActressCanonicalizer::new(repo_with(&["Jane Doe"]).await, 500);
        assert_eq!(canonicalizer.canonicalize("Doe Jane").await, "Jane Doe");
        assert_eq!(canonicalizer.canonicalize("  jane   DOE ").await, "Jane Doe");
    }

    #[tokio::test]
    async fn test_unknown_name_is_trimmed_input() {
        let canonicalizer = ActressCanonicalizer::new(repo_with(&["Jane Doe"]).await, 500);
        assert_eq!(canonicalizer.canonicalize("  Mary Roe ").await, "Mary Roe");
    }

    #[tokio::test]
    async fn test_first_stored_spelling_wins() {
        let canonicalizer =
            ActressCanonicalizer::new(repo_with(&["Jane Doe", "doe jane"]).await, 500);
        assert_eq!(canonicalizer.canonicalize("DOE JANE").await, "Jane Doe");
    }

    #[tokio::test]
    async fn test_sample_limit_bounds_matching() {
        let canonicalizer =
            ActressCanonicalizer::new(repo_with(&["Mary Roe", "Jane Doe"]).await, 1);
        assert_eq!(canonicalizer.canonicalize("Doe Jane").await, "Doe Jane");
    }

    #[tokio::test]
    async fn test_search_and_list() {
        let canonicalizer = ActressCanonicalizer::new(
            repo_with(&["Jane Doe", "Mary Roe", "Jane Doe"]).await,
            500,
        );

        assert_eq!(canonicalizer.search_by_actress("doe JANE").await.unwrap().len(), 2);
        assert_eq!(canonicalizer.search_by_actress("  ").await.unwrap().len(), 3);
        assert!(canonicalizer.search_by_actress("smith").await.unwrap().is_empty());

        assert_eq!(
            canonicalizer.list_unique_actresses(None).await.unwrap(),
            vec!["Jane Doe".to_string(), "Mary Roe".to_string()]
        );
        assert_eq!(
            canonicalizer.list_unique_actresses(Some("ro")).await.unwrap(),
            vec!["Mary Roe".to_string()]
        );
    }
}
