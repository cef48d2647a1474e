//! # shelfmark-fetch
//!
//! Page title resolution for shelfmark.
//!
//! [`HttpTitleResolver`] fetches a page with a browser-like header set and
//! pulls a human-readable title out of the HTML with [`extract_title`].
//! Resolution never fails: any problem degrades to returning the input URL.
//!
//! Enable the `mock` feature for [`mock::MockTitleResolver`], a scripted
//! resolver with a timestamped call log.

pub mod config;
pub mod extract;
pub mod resolver;

#[cfg(feature = "mock")]
pub mod mock;

pub use config::ResolverConfig;
pub use extract::extract_title;
pub use resolver::{FetchError, HttpTitleResolver};

// Re-export the trait so callers need only this crate.
pub use shelfmark_core::TitleResolver;
