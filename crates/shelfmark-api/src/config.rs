//! Server configuration loaded from environment variables.
//!
//! Every setting has a default from [`shelfmark_core::defaults`]; a `.env`
//! file is honored when `main` loads it through `dotenvy` before calling
//! [`AppConfig::from_env`].

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use shelfmark_core::{defaults, Error, Result, TagCasePolicy};
use shelfmark_fetch::ResolverConfig;

/// Where bookmarks are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process memory; everything is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(Error::Config(format!(
                "Invalid STORAGE_BACKEND '{}': expected 'postgres' or 'memory'",
                other
            ))),
        }
    }
}

/// Settings consumed by the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Pause after every resolution attempt in a bulk title sync.
    pub sync_delay: Duration,
    /// Distinct stored names scanned when canonicalizing an actress name.
    pub actress_sample_limit: i64,
    pub tag_case_policy: TagCasePolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            sync_delay: Duration::from_millis(defaults::SYNC_DELAY_MS),
            actress_sample_limit: defaults::ACTRESS_SAMPLE_LIMIT,
            tag_case_policy: TagCasePolicy::default(),
        }
    }
}

/// Global request rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per period (burst size).
    pub requests: u32,
    pub period_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            requests: defaults::RATE_LIMIT_REQUESTS,
            period_secs: defaults::RATE_LIMIT_PERIOD_SECS,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub storage_backend: StorageBackend,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// Frontend build served for non-API paths, if set.
    pub static_dir: Option<PathBuf>,
    pub services: ServiceSettings,
    pub resolver: ResolverConfig,
    pub rate_limit: RateLimitConfig,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Split a comma-separated origin list, dropping blanks.
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Unparsable numbers fall back to their defaults; an unknown
    /// `STORAGE_BACKEND` or `TAG_CASE_POLICY` is an error.
    pub fn from_env() -> Result<Self> {
        let storage_backend = match std::env::var("STORAGE_BACKEND") {
            Ok(v) if !v.trim().is_empty() => v.parse()?,
            _ => StorageBackend::default(),
        };

        let tag_case_policy = match std::env::var("TAG_CASE_POLICY") {
            Ok(v) if !v.trim().is_empty() => v.parse::<TagCasePolicy>().map_err(Error::Config)?,
            _ => TagCasePolicy::default(),
        };

        let origins = std::env::var("ALLOWED_ORIGINS").unwrap_or_default();
        let mut allowed_origins = split_origins(&origins);
        if allowed_origins.is_empty() {
            allowed_origins = split_origins(defaults::ALLOWED_ORIGINS);
        }

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            storage_backend,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults::DB_MAX_CONNECTIONS),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", defaults::SERVER_PORT),
            allowed_origins,
            static_dir,
            services: ServiceSettings {
                sync_delay: Duration::from_millis(env_or("SYNC_DELAY_MS", defaults::SYNC_DELAY_MS)),
                actress_sample_limit: env_or("ACTRESS_SAMPLE_LIMIT", defaults::ACTRESS_SAMPLE_LIMIT)
                    .max(0),
                tag_case_policy,
            },
            resolver: ResolverConfig::from_env(),
            rate_limit: RateLimitConfig {
                enabled: std::env::var("RATE_LIMIT_ENABLED")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
                requests: env_or("RATE_LIMIT_REQUESTS", defaults::RATE_LIMIT_REQUESTS),
                period_secs: env_or("RATE_LIMIT_PERIOD_SECS", defaults::RATE_LIMIT_PERIOD_SECS),
            },
        })
    }
}
