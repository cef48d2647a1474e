//! Service layer for business logic.

pub mod actress_canonicalizer;
pub mod bookmark_service;
pub mod title_sync;

pub use actress_canonicalizer::ActressCanonicalizer;
pub use bookmark_service::{BookmarkService, CreateBookmark};
pub use title_sync::TitleSyncTask;
