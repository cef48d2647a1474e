//! # shelfmark-core
//!
//! Core types, traits, and bookmark rules for the shelfmark bookmark manager.
//!
//! This crate holds everything the storage, fetch, and API crates agree on:
//! the [`Bookmark`] record, the [`BookmarkRepository`] and [`TitleResolver`]
//! seams, and the pure rules for tags, actress-name tokens, and pagination.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod names;
pub mod tags;
pub mod text;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use names::{contains_all_tokens, name_signature, query_tokens};
pub use tags::{merge_tags, normalize_tags, TagCasePolicy};
pub use text::collapse_whitespace;
pub use traits::*;

/// Generate a new time-ordered (v7) bookmark identifier.
pub fn new_v7() -> uuid::Uuid {
    uuid::Uuid::now_v7()
}
