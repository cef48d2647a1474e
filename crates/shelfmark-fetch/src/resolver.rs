//! HTTP title resolver.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use shelfmark_core::{Error, Result, TitleResolver};

use crate::config::ResolverConfig;
use crate::extract::extract_title;

/// Why a single fetch produced no title. Never escapes [`TitleResolver::resolve`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("no title candidate in document")]
    NoTitle,
}

/// Fetches pages with a desktop-browser header set and extracts their title.
#[derive(Clone)]
pub struct HttpTitleResolver {
    client: Client,
    config: ResolverConfig,
}

/// Headers a desktop Chrome sends on a top-level navigation.
fn browser_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let user_agent = HeaderValue::from_str(user_agent)
        .map_err(|e| Error::Config(format!("invalid user agent: {}", e)))?;
    headers.insert(header::USER_AGENT, user_agent);
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static("gzip, deflate, br"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    Ok(headers)
}

/// `scheme://host[:port]/` for URLs that have a tuple origin.
fn referer_for(url: &Url) -> Option<String> {
    let origin = url.origin();
    origin
        .is_tuple()
        .then(|| format!("{}/", origin.ascii_serialization()))
}

impl HttpTitleResolver {
    /// Build a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(browser_headers(&config.user_agent)?)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        debug!(
            subsystem = "fetch",
            component = "resolver",
            timeout_ms = config.timeout.as_millis() as u64,
            max_html_bytes = config.max_html_bytes,
            "Title resolver initialized"
        );

        Ok(Self { client, config })
    }

    /// Build a resolver from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ResolverConfig::from_env())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Fetch `url` and extract its title, reporting why when that fails.
    pub async fn try_resolve(&self, url: &str) -> std::result::Result<String, FetchError> {
        let parsed = Url::parse(url)?;

        let mut request = self.client.get(parsed.clone());
        if let Some(referer) = referer_for(&parsed) {
            request = request.header(header::REFERER, referer);
        }

        let mut response = request.send().await?.error_for_status()?;

        let limit = self.config.max_html_bytes;
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::TooLarge { limit });
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        let html = String::from_utf8_lossy(&body);
        extract_title(&html).ok_or(FetchError::NoTitle)
    }
}

#[async_trait]
impl TitleResolver for HttpTitleResolver {
    async fn resolve(&self, url: &str) -> String {
        let start = Instant::now();
        match self.try_resolve(url).await {
            Ok(title) => {
                debug!(
                    subsystem = "fetch",
                    component = "resolver",
                    op = "resolve",
                    url = %url,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Title resolved"
                );
                title
            }
            Err(e) => {
                warn!(
                    subsystem = "fetch",
                    component = "resolver",
                    op = "resolve",
                    url = %url,
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Title resolution failed, falling back to url"
                );
                url.to_string()
            }
        }
    }
}
