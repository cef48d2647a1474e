//! Shared application state.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{Quota, RateLimiter};
use tracing::warn;

use shelfmark_core::{BookmarkRepository, TitleResolver};

use crate::config::{RateLimitConfig, ServiceSettings};
use crate::services::{ActressCanonicalizer, BookmarkService, TitleSyncTask};

pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub bookmarks: BookmarkService,
    pub actresses: ActressCanonicalizer,
    pub sync: TitleSyncTask,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// Wire the services over one repository and one resolver.
    pub fn new(
        repo: Arc<dyn BookmarkRepository>,
        resolver: Arc<dyn TitleResolver>,
        settings: &ServiceSettings,
    ) -> Self {
        let actresses = ActressCanonicalizer::new(repo.clone(), settings.actress_sample_limit);
        Self {
            bookmarks: BookmarkService::new(
                repo.clone(),
                resolver.clone(),
                actresses.clone(),
                settings.tag_case_policy,
            ),
            actresses,
            sync: TitleSyncTask::new(repo, resolver, settings.sync_delay),
            rate_limiter: None,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: Option<Arc<GlobalRateLimiter>>) -> Self {
        self.rate_limiter = limiter;
        self
    }
}

/// Build the global limiter: `requests` per `period_secs`, refilled evenly.
///
/// Returns `None` when disabled or when the numbers cannot form a quota.
pub fn build_rate_limiter(config: &RateLimitConfig) -> Option<Arc<GlobalRateLimiter>> {
    if !config.enabled {
        return None;
    }

    let (Some(burst), true) = (NonZeroU32::new(config.requests), config.period_secs > 0) else {
        warn!(
            requests = config.requests,
            period_secs = config.period_secs,
            "Rate limit requires non-zero requests and period, disabling"
        );
        return None;
    };

    let replenish = Duration::from_secs(config.period_secs) / burst.get();
    let quota = Quota::with_period(replenish)?.allow_burst(burst);
    Some(Arc::new(RateLimiter::direct(quota)))
}
