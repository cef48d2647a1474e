//! Mock title resolver for deterministic testing.
//!
//! Scripted URLs resolve to their title; every other URL "fails" and
//! resolves to itself, like the HTTP resolver does. Calls are logged with
//! a `tokio::time::Instant`, so tests running under paused time can assert
//! how resolutions were spaced.
//!
//! ```rust,ignore
//! use shelfmark_fetch::mock::MockTitleResolver;
//! use shelfmark_fetch::TitleResolver;
//!
//! let resolver = MockTitleResolver::new().with_title("https://a.test", "A");
//! assert_eq!(resolver.resolve("https://a.test").await, "A");
//! assert_eq!(resolver.resolve("https://b.test").await, "https://b.test");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use shelfmark_core::TitleResolver;

/// Scripted resolver with a call log.
#[derive(Clone, Default)]
pub struct MockTitleResolver {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    titles: HashMap<String, String>,
    latency: Duration,
    per_url_latency: HashMap<String, Duration>,
}

/// One `resolve` invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub url: String,
    /// When the call started.
    pub started: Instant,
    /// When the call returned.
    pub finished: Instant,
}

impl MockTitleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `url` to `title`.
    pub fn with_title(mut self, url: impl Into<String>, title: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .titles
            .insert(url.into(), title.into());
        self
    }

    /// Simulated latency for every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        Arc::make_mut(&mut self.config).latency = latency;
        self
    }

    /// Simulated latency for one URL (e.g. a fetch that runs into its timeout).
    pub fn with_url_latency(mut self, url: impl Into<String>, latency: Duration) -> Self {
        Arc::make_mut(&mut self.config)
            .per_url_latency
            .insert(url.into(), latency);
        self
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn clear_log(&self) {
        if let Ok(mut log) = self.call_log.lock() {
            log.clear();
        }
    }
}

#[async_trait]
impl TitleResolver for MockTitleResolver {
    async fn resolve(&self, url: &str) -> String {
        let started = Instant::now();

        let latency = self
            .config
            .per_url_latency
            .get(url)
            .copied()
            .unwrap_or(self.config.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let title = self
            .config
            .titles
            .get(url)
            .cloned()
            .unwrap_or_else(|| url.to_string());

        if let Ok(mut log) = self.call_log.lock() {
            log.push(MockCall {
                url: url.to_string(),
                started,
                finished: Instant::now(),
            });
        }
        title
    }
}
