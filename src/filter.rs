//! Content-page filtering.
//!
//! Wikipedia articles link to thousands of meta pages: disambiguation pages,
//! stubs, templates, citation boilerplate, administrative namespaces. None of
//! them make useful steps in a link chain, and letting them through both
//! pollutes paths and blows up the search fan-out. This module classifies a
//! raw title as regular content or noise.
//!
//! The marker table is a precision lever, not an implementation detail.
//! Rejecting too much shrinks the graph and degrades search quality;
//! rejecting too little lets administrative noise into answers. Keep it
//! covered by tests when tuning.

/// Substring markers for administrative and meta pages.
///
/// Matched case-insensitively anywhere in the title. Namespace prefixes
/// (`category:`, `file:`, ...) appear with their trailing colon so that an
/// article about, say, the File Allocation Table is not caught.
pub const META_MARKERS: &[&str] = &[
    "disambiguation",
    "stub",
    "wikidata",
    "use dmy dates",
    "use mdy dates",
    "articles with",
    "short description",
    "identifier",
    "automatic",
    "cs1",
    "wikipedia",
    "category:",
    "file:",
    "template:",
    "help:",
    "user:",
    "talk:",
    "portal:",
    "book:",
    "draft:",
    "all articles",
    "pages with",
    "coordinates on wikidata",
    "webarchive template",
    "citation",
];

/// Prefixes for collection pages that link everywhere and mean nothing.
const COLLECTION_PREFIXES: &[&str] = &["list of", "index of"];

/// Titles longer than this are almost always generated meta pages.
const MAX_TITLE_LEN: usize = 150;

/// Returns `true` if the title looks like a regular content page.
///
/// Pure function, no I/O. Rejects empty titles, titles carrying any
/// [`META_MARKERS`] substring, "list of"/"index of" collection pages, and
/// very long titles.
///
/// # Examples
///
/// ```rust
/// use wikihop::filter::is_content;
///
/// assert!(is_content("Albert Einstein"));
/// assert!(!is_content("Category:Physicists"));
/// assert!(!is_content("Foo (disambiguation)"));
/// ```
#[must_use]
pub fn is_content(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    if name.len() > MAX_TITLE_LEN {
        return false;
    }

    let lower = name.to_lowercase();

    if META_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return false;
    }

    if COLLECTION_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return false;
    }

    true
}
