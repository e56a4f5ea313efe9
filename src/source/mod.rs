//! Raw link source abstraction.
//!
//! Provides a unified interface for resolving a free-text topic name to a
//! canonical page and its raw outgoing references (links plus categories).
//! The reference lists returned here are unfiltered; classification and
//! caching happen in [`crate::cache::LinkCache`].

mod fixture;
mod mediawiki;

pub use fixture::StaticLinkSource;
pub use mediawiki::MediaWikiClient;

use crate::Result;
use std::time::Duration;

/// A resolved page with its raw outgoing references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Canonical title after redirect and fuzzy resolution.
    pub canonical_title: String,
    /// Raw outgoing article links, unfiltered.
    pub links: Vec<String>,
    /// Category names the page belongs to, unfiltered, without the
    /// namespace prefix.
    pub categories: Vec<String>,
}

/// Trait for link sources.
///
/// Implementations resolve a topic name to its canonical page and raw
/// references, applying whatever fuzzy-matching or redirect logic the
/// backing service needs.
///
/// # Contract
///
/// - `Ok(None)` means the name resolved to nothing. "Page not found" is a
///   first-class outcome, never an error.
/// - `Err` is reserved for transport-level failures (timeouts, connection
///   refused, malformed responses). Callers recover by treating the topic
///   as having no references.
pub trait LinkSource: Send + Sync {
    /// The source name, used in logs and metrics labels.
    fn name(&self) -> &'static str;

    /// Resolves a topic name to its page and raw references.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures.
    fn resolve(&self, name: &str) -> Result<Option<ResolvedPage>>;
}

/// HTTP client configuration for link sources.
#[derive(Debug, Clone)]
pub struct SourceHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
    /// User-Agent header sent with every request.
    ///
    /// The Wikimedia API etiquette asks clients to identify themselves;
    /// anonymous agents get throttled aggressively.
    pub user_agent: String,
}

impl Default for SourceHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
            user_agent: concat!("wikihop/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SourceHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("WIKIHOP_HTTP_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("WIKIHOP_HTTP_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("WIKIHOP_HTTP_USER_AGENT") {
            if !v.trim().is_empty() {
                self.user_agent = v;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client with the configured timeouts.
#[must_use]
pub fn build_http_client(config: &SourceHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build source HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
