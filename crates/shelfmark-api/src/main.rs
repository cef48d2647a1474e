//! shelfmark-api - HTTP API server for shelfmark

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfmark_api::config::{AppConfig, StorageBackend};
use shelfmark_api::state::{build_rate_limiter, AppState};
use shelfmark_core::BookmarkRepository;
use shelfmark_db::{Database, MemoryBookmarkRepository, PoolConfig};
use shelfmark_fetch::HttpTitleResolver;

/// Install the global subscriber; the returned guard flushes the log file.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables daily-rotated file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelfmark_api=debug,shelfmark_fetch=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("shelfmark-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
    guard
}

async fn open_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn BookmarkRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool_config = PoolConfig::default().max_connections(config.db_max_connections);
            let db = Database::connect(&config.database_url, pool_config).await?;
            db.migrate().await?;
            info!(subsystem = "db", "Connected to PostgreSQL, migrations applied");
            Ok(Arc::new(db.bookmarks))
        }
        StorageBackend::Memory => {
            tracing::warn!(
                subsystem = "db",
                "Using in-memory storage; bookmarks are lost on restart"
            );
            Ok(Arc::new(MemoryBookmarkRepository::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let config = AppConfig::from_env()?;
    info!(
        storage = ?config.storage_backend,
        tag_case_policy = %config.services.tag_case_policy,
        sync_delay_ms = config.services.sync_delay.as_millis() as u64,
        static_dir = ?config.static_dir,
        "Configuration loaded"
    );

    let repo = open_repository(&config).await?;
    let resolver = Arc::new(HttpTitleResolver::new(config.resolver.clone())?);

    let state = AppState::new(repo, resolver, &config.services)
        .with_rate_limiter(build_rate_limiter(&config.rate_limit));

    let app = shelfmark_api::app(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
