//! # shelfmark-db
//!
//! Storage layer for shelfmark.
//!
//! This crate provides:
//! - Pool setup ([`connect_pool`])
//! - [`PgBookmarkRepository`], the PostgreSQL implementation of
//!   [`BookmarkRepository`](shelfmark_core::BookmarkRepository)
//! - [`MemoryBookmarkRepository`], the same contract held in process memory
//! - Schema migrations (feature `migrations`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use shelfmark_db::{BookmarkRepository, Database, NewBookmark, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/shelfmark", PoolConfig::default()).await?;
//!
//!     let bookmark = db.bookmarks.insert(NewBookmark {
//!         url: "https://www.rust-lang.org".to_string(),
//!         title: Some("Rust Programming Language".to_string()),
//!         tags: vec!["rust".to_string()],
//!         actress_name: None,
//!     }).await?;
//!
//!     println!("Created bookmark: {}", bookmark.id);
//!     Ok(())
//! }
//! ```
pub mod bookmarks;
pub mod memory;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use shelfmark_core::*;

pub use bookmarks::PgBookmarkRepository;
pub use memory::MemoryBookmarkRepository;
pub use pool::{connect_pool, PoolConfig};

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Bookmark repository.
    pub bookmarks: PgBookmarkRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            bookmarks: PgBookmarkRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to `url` with the given pool sizing.
    pub async fn connect(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = connect_pool(url, &config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }
}
