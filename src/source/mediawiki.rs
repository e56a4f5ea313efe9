//! MediaWiki Action API client.
//!
//! Resolution is multi-strategy, because the API is finicky about titles:
//! an exact lookup (following redirects) is tried first, then a full-text
//! search for fuzzy matching, then an optionally configured fallback title.
//! Total failure is reported as not-found, never as a panic or a
//! "page missing" error.

use super::{LinkSource, ResolvedPage, SourceHttpConfig, build_http_client};
use crate::{Error, Result};
use serde::Deserialize;

/// Category namespace prefix stripped from category members.
const CATEGORY_PREFIX: &str = "Category:";

/// Ceiling on continuation round-trips for one page.
///
/// Heavily linked pages (country articles, years) paginate their link lists;
/// ten batches at `max` page size covers everything we could usefully search
/// while bounding worst-case latency per fetch.
const MAX_CONTINUATIONS: usize = 10;

/// MediaWiki Action API link source.
pub struct MediaWikiClient {
    /// API endpoint.
    endpoint: String,
    /// Title substituted when every resolution strategy fails.
    fallback_title: Option<String>,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl MediaWikiClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://en.wikipedia.org/w/api.php";

    /// Creates a new client for the English Wikipedia.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            fallback_title: None,
            client: build_http_client(&SourceHttpConfig::from_env()),
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets a title to substitute when every resolution strategy fails.
    #[must_use]
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = Some(title.into());
        self
    }

    /// Sets HTTP client timeouts for API requests.
    #[must_use]
    pub fn with_http_config(mut self, config: &SourceHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Fetches one page's links and categories, following continuations.
    ///
    /// Returns `Ok(None)` when the API reports the title as missing.
    fn fetch_page(&self, title: &str) -> Result<Option<ResolvedPage>> {
        let mut canonical: Option<String> = None;
        let mut links: Vec<String> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        let mut continuation: Option<Continuation> = None;

        for _ in 0..MAX_CONTINUATIONS {
            let mut params: Vec<(&str, String)> = vec![
                ("action", "query".to_string()),
                ("format", "json".to_string()),
                ("formatversion", "2".to_string()),
                ("redirects", "1".to_string()),
                ("prop", "links|categories".to_string()),
                ("pllimit", "max".to_string()),
                ("cllimit", "max".to_string()),
                ("titles", title.to_string()),
            ];
            if let Some(cont) = &continuation {
                params.push(("continue", cont.token.clone()));
                if let Some(pl) = &cont.plcontinue {
                    params.push(("plcontinue", pl.clone()));
                }
                if let Some(cl) = &cont.clcontinue {
                    params.push(("clcontinue", cl.clone()));
                }
            }

            let response: QueryResponse = self.request(&params)?;
            let Some(page) = response
                .query
                .and_then(|query| query.pages.into_iter().next())
            else {
                break;
            };

            if page.missing {
                return Ok(None);
            }

            if canonical.is_none() {
                canonical = Some(page.title);
            }
            links.extend(page.links.into_iter().map(|link| link.title));
            categories.extend(
                page.categories
                    .into_iter()
                    .map(|category| strip_category_prefix(&category.title)),
            );

            match response.continuation {
                Some(cont) => continuation = Some(cont),
                None => break,
            }
        }

        Ok(canonical.map(|canonical_title| ResolvedPage {
            canonical_title,
            links,
            categories,
        }))
    }

    /// Finds the best-matching title via full-text search.
    fn search_title(&self, name: &str) -> Result<Option<String>> {
        let params: Vec<(&str, String)> = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
            ("list", "search".to_string()),
            ("srlimit", "5".to_string()),
            ("srsearch", name.to_string()),
        ];

        let response: QueryResponse = self.request(&params)?;
        Ok(response
            .query
            .and_then(|query| query.search.into_iter().next())
            .map(|hit| hit.title))
    }

    /// Issues one API request and deserializes the response.
    fn request(&self, params: &[(&str, String)]) -> Result<QueryResponse> {
        self.client
            .get(&self.endpoint)
            .query(params)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "MediaWiki request failed"
                );
                Error::OperationFailed {
                    operation: "mediawiki_query".to_string(),
                    cause: e.to_string(),
                }
            })?
            .json()
            .map_err(|e| Error::OperationFailed {
                operation: "mediawiki_parse".to_string(),
                cause: e.to_string(),
            })
    }
}

impl Default for MediaWikiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkSource for MediaWikiClient {
    fn name(&self) -> &'static str {
        "mediawiki"
    }

    fn resolve(&self, name: &str) -> Result<Option<ResolvedPage>> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let mut last_transport_error: Option<Error> = None;

        // First try: exact title with redirects
        match self.fetch_page(name) {
            Ok(Some(page)) => return Ok(Some(page)),
            Ok(None) => {}
            Err(e) => last_transport_error = Some(e),
        }

        // Second try: full-text search for a fuzzy match
        match self.search_title(name) {
            Ok(Some(title)) => match self.fetch_page(&title) {
                Ok(Some(page)) => return Ok(Some(page)),
                Ok(None) => {}
                Err(e) => last_transport_error = Some(e),
            },
            Ok(None) => {}
            Err(e) => last_transport_error = Some(e),
        }

        // Last resort: configured fallback title
        if let Some(fallback) = &self.fallback_title {
            if fallback != name {
                tracing::debug!(name, fallback, "Substituting fallback title");
                if let Ok(Some(page)) = self.fetch_page(fallback) {
                    return Ok(Some(page));
                }
            }
        }

        match last_transport_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

/// Strips the `Category:` namespace prefix if present.
fn strip_category_prefix(title: &str) -> String {
    title
        .strip_prefix(CATEGORY_PREFIX)
        .unwrap_or(title)
        .to_string()
}

// ============================================================================
// API response shapes (formatversion=2)
// ============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    #[serde(rename = "continue")]
    token: String,
    plcontinue: Option<String>,
    clcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<PageBody>,
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    links: Vec<TitleRef>,
    #[serde(default)]
    categories: Vec<TitleRef>,
}

#[derive(Debug, Deserialize)]
struct TitleRef {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_category_prefix() {
        assert_eq!(strip_category_prefix("Category:Physicists"), "Physicists");
        assert_eq!(strip_category_prefix("Physicists"), "Physicists");
    }

    #[test]
    fn test_builder_configuration() {
        let client = MediaWikiClient::new()
            .with_endpoint("https://de.wikipedia.org/w/api.php")
            .with_fallback_title("Physik");
        assert_eq!(client.endpoint, "https://de.wikipedia.org/w/api.php");
        assert_eq!(client.fallback_title.as_deref(), Some("Physik"));
    }

    #[test]
    fn test_empty_name_resolves_to_none() {
        let client = MediaWikiClient::new();
        let result = client.resolve("   ").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_parse_query_response() {
        let json = r#"{
            "continue": {"plcontinue": "123|0|Next", "continue": "||"},
            "query": {
                "pages": [{
                    "pageid": 736,
                    "title": "Albert Einstein",
                    "links": [{"ns": 0, "title": "Physics"}, {"ns": 0, "title": "Ulm"}],
                    "categories": [{"ns": 14, "title": "Category:1879 births"}]
                }]
            }
        }"#;

        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let cont = response.continuation.unwrap();
        assert_eq!(cont.plcontinue.as_deref(), Some("123|0|Next"));
        assert!(cont.clcontinue.is_none());

        let page = response.query.unwrap().pages.into_iter().next().unwrap();
        assert_eq!(page.title, "Albert Einstein");
        assert!(!page.missing);
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.categories[0].title, "Category:1879 births");
    }

    #[test]
    fn test_parse_missing_page() {
        let json = r#"{
            "query": {
                "pages": [{"title": "Nonexistent page xyz", "missing": true}]
            }
        }"#;

        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let page = response.query.unwrap().pages.into_iter().next().unwrap();
        assert!(page.missing);
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "query": {
                "search": [
                    {"ns": 0, "title": "Albert Einstein"},
                    {"ns": 0, "title": "Einstein family"}
                ]
            }
        }"#;

        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let hits = response.query.unwrap().search;
        assert_eq!(hits[0].title, "Albert Einstein");
    }
}
