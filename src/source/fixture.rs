//! In-memory link source for testing and offline use.
//!
//! Provides a fast, deterministic implementation of [`LinkSource`] backed by
//! a fixed page table. Topics can be marked as failing to exercise transport
//! error recovery, and resolve calls are counted so tests can assert on
//! cache behavior.

use super::{LinkSource, ResolvedPage};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory link source for testing.
///
/// # Example
///
/// ```rust
/// use wikihop::source::{LinkSource, StaticLinkSource};
///
/// let source = StaticLinkSource::new()
///     .with_page("A", &["B", "C"], &["Letters"])
///     .with_page("B", &["C"], &[]);
///
/// let page = source.resolve("A").unwrap().unwrap();
/// assert_eq!(page.links, vec!["B", "C"]);
/// ```
#[derive(Debug, Default)]
pub struct StaticLinkSource {
    pages: RwLock<HashMap<String, ResolvedPage>>,
    failing: RwLock<HashSet<String>>,
    resolve_calls: AtomicUsize,
    resolved: RwLock<Vec<String>>,
}

impl StaticLinkSource {
    /// Creates a new empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, builder style.
    #[must_use]
    pub fn with_page(self, title: &str, links: &[&str], categories: &[&str]) -> Self {
        self.insert_page(title, links, categories);
        self
    }

    /// Adds a page to an existing source.
    pub fn insert_page(&self, title: &str, links: &[&str], categories: &[&str]) {
        let page = ResolvedPage {
            canonical_title: title.to_string(),
            links: links.iter().map(ToString::to_string).collect(),
            categories: categories.iter().map(ToString::to_string).collect(),
        };
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(title.to_string(), page);
        }
    }

    /// Marks a topic as failing with a transport error.
    pub fn fail_topic(&self, title: &str) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(title.to_string());
        }
    }

    /// Returns how many times `resolve` has been called.
    #[must_use]
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::Relaxed)
    }

    /// Returns the topic names passed to `resolve`, in call order.
    #[must_use]
    pub fn resolved_topics(&self) -> Vec<String> {
        self.resolved
            .read()
            .map(|resolved| resolved.clone())
            .unwrap_or_default()
    }
}

impl LinkSource for StaticLinkSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn resolve(&self, name: &str) -> Result<Option<ResolvedPage>> {
        self.resolve_calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut resolved) = self.resolved.write() {
            resolved.push(name.to_string());
        }

        let is_failing = self
            .failing
            .read()
            .map(|failing| failing.contains(name))
            .unwrap_or(false);
        if is_failing {
            return Err(Error::OperationFailed {
                operation: "static_resolve".to_string(),
                cause: format!("simulated transport failure for '{name}'"),
            });
        }

        let page = self
            .pages
            .read()
            .ok()
            .and_then(|pages| pages.get(name).cloned());
        Ok(page)
    }
}
