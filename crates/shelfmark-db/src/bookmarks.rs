//! PostgreSQL bookmark repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use shelfmark_core::{
    defaults, new_v7, Bookmark, BookmarkPage, BookmarkRepository, Error, NewBookmark, PageRequest,
    Result,
};

use crate::escape_like;

const BOOKMARK_COLUMNS: &str = "id, url, title, tags, actress_name, date_added";

/// PostgreSQL implementation of BookmarkRepository.
///
/// Tags are stored as a native `TEXT[]`; [`row_to_bookmark`] is the single
/// place rows become domain records.
#[derive(Clone)]
pub struct PgBookmarkRepository {
    pool: Pool<Postgres>,
}

impl PgBookmarkRepository {
    /// Create a new PgBookmarkRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn row_to_bookmark(row: &PgRow) -> Bookmark {
    Bookmark {
        id: row.get("id"),
        url: row.get("url"),
        title: row.get("title"),
        tags: row.get::<Option<Vec<String>>, _>("tags").unwrap_or_default(),
        actress_name: row.get("actress_name"),
        date_added: row.get("date_added"),
    }
}

/// `ILIKE` patterns matching each token anywhere in the column.
fn token_patterns(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| format!("%{}%", escape_like(t)))
        .collect()
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
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

        sqlx::query(
            "INSERT INTO bookmark (id, url, title, tags, actress_name, date_added)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(bookmark.id)
        .bind(&bookmark.url)
        .bind(&bookmark.title)
        .bind(&bookmark.tags)
        .bind(&bookmark.actress_name)
        .bind(bookmark.date_added)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "bookmarks",
            op = "insert",
            bookmark_id = %bookmark.id,
            "Bookmark inserted"
        );
        Ok(bookmark)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Bookmark>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bookmark WHERE id = $1",
            BOOKMARK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_bookmark))
    }

    async fn find_page(&self, page: PageRequest) -> Result<BookmarkPage> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookmark")
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM bookmark ORDER BY date_added DESC, id DESC LIMIT $1 OFFSET $2",
            BOOKMARK_COLUMNS
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        let items = rows.iter().map(row_to_bookmark).collect();
        Ok(BookmarkPage::new(items, total, page))
    }

    async fn update_title(&self, id: Uuid, title: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE bookmark SET title = $1 WHERE id = $2")
            .bind(title)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_tags(&self, id: Uuid, tags: &[String]) -> Result<bool> {
        let result = sqlx::query("UPDATE bookmark SET tags = $1 WHERE id = $2")
            .bind(tags)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmark WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Bookmark>> {
        let keyword = keyword.trim();
        let rows = if keyword.is_empty() {
            sqlx::query(&format!(
                "SELECT {} FROM bookmark ORDER BY date_added DESC, id DESC",
                BOOKMARK_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(&format!(
                "SELECT {} FROM bookmark
                 WHERE title ILIKE $1 OR url ILIKE $1 OR actress_name ILIKE $1
                 ORDER BY date_added DESC, id DESC",
                BOOKMARK_COLUMNS
            ))
            .bind(format!("%{}%", escape_like(keyword)))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(Error::Database)?;

        Ok(rows.iter().map(row_to_bookmark).collect())
    }

    async fn search_by_actress(&self, tokens: &[String]) -> Result<Vec<Bookmark>> {
        // ILIKE ALL over an empty array is true, so no tokens means "any actress".
        let rows = sqlx::query(&format!(
            "SELECT {} FROM bookmark
             WHERE actress_name IS NOT NULL AND actress_name ILIKE ALL($1::text[])
             ORDER BY date_added DESC, id DESC",
            BOOKMARK_COLUMNS
        ))
        .bind(token_patterns(tokens))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(row_to_bookmark).collect())
    }

    async fn distinct_actresses(&self, tokens: &[String]) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT actress_name FROM bookmark
             WHERE actress_name IS NOT NULL AND actress_name ILIKE ALL($1::text[])
             ORDER BY actress_name",
        )
        .bind(token_patterns(tokens))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(names)
    }

    async fn sample_actress_names(&self, limit: i64) -> Result<Vec<String>> {
        // Oldest spelling first, so the first stored variant wins a signature match.
        let names = sqlx::query_scalar::<_, String>(
            "SELECT actress_name FROM bookmark
             WHERE actress_name IS NOT NULL
             GROUP BY actress_name
             ORDER BY MIN(date_added)
             LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(names)
    }

    async fn list_unresolved(&self) -> Result<Vec<Bookmark>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM bookmark
             WHERE title IS NULL OR title ~ '^[[:space:]]*$' OR strpos(title, $1) > 0
             ORDER BY date_added ASC, id ASC",
            BOOKMARK_COLUMNS
        ))
        .bind(defaults::UNRESOLVED_TITLE_MARKER)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(row_to_bookmark).collect())
    }
}
