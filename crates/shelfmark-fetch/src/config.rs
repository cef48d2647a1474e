//! Title resolver configuration.

use std::time::Duration;

use shelfmark_core::defaults;

/// Settings for [`HttpTitleResolver`](crate::HttpTitleResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Whole-request timeout (connect, headers, and body).
    pub timeout: Duration,
    /// User-Agent header sent with every fetch.
    pub user_agent: String,
    /// Bodies larger than this are abandoned.
    pub max_html_bytes: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::TITLE_FETCH_TIMEOUT_SECS),
            user_agent: defaults::USER_AGENT.to_string(),
            max_html_bytes: defaults::MAX_HTML_BYTES,
        }
    }
}

impl ResolverConfig {
    /// Load from environment, falling back to defaults.
    ///
    /// - `TITLE_FETCH_TIMEOUT_SECS`
    /// - `TITLE_FETCH_USER_AGENT`
    /// - `TITLE_FETCH_MAX_BYTES`
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("TITLE_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults::TITLE_FETCH_TIMEOUT_SECS);

        let user_agent = std::env::var("TITLE_FETCH_USER_AGENT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::USER_AGENT.to_string());

        let max_html_bytes = std::env::var("TITLE_FETCH_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults::MAX_HTML_BYTES);

        Self {
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
            max_html_bytes,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the body size cap.
    pub fn with_max_html_bytes(mut self, max: u64) -> Self {
        self.max_html_bytes = max;
        self
    }
}
