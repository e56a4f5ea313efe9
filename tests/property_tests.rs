//! Property-based tests for the filter and the ranking heuristic.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Namespace-prefixed and disambiguation titles are never content
//! - Ranking respects the cap and never invents candidates
//! - Scores are non-increasing through the ranked output
//! - Single-node paths always validate

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use std::sync::Arc;
use wikihop::filter::is_content;
use wikihop::search::score::{rank_candidates, relevance, tokenize};
use wikihop::source::StaticLinkSource;
use wikihop::storage::InMemoryReferenceStore;
use wikihop::{LinkCache, PathValidator};

proptest! {
    /// Property: any title starting with `Category:` is rejected,
    /// regardless of suffix or case of the prefix.
    #[test]
    fn prop_category_prefix_never_content(
        prefix in prop::sample::select(vec!["Category:", "category:", "CATEGORY:"]),
        suffix in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let title = format!("{prefix}{suffix}");
        prop_assert!(!is_content(&title));
    }

    /// Property: any title containing `disambiguation` is rejected.
    #[test]
    fn prop_disambiguation_never_content(
        before in "[a-zA-Z ]{0,20}",
        after in "[a-zA-Z ]{0,20}",
    ) {
        let title = format!("{before}disambiguation{after}");
        prop_assert!(!is_content(&title));
    }

    /// Property: plain alphabetic multi-word titles of sane length are
    /// accepted unless they collide with a marker.
    #[test]
    fn prop_marker_free_titles_are_content(title in "[A-Z][a-z]{1,12}( [a-z]{1,12}){0,3}") {
        let lower = title.to_lowercase();
        let collides = wikihop::filter::META_MARKERS
            .iter()
            .any(|marker| lower.contains(marker))
            || lower.starts_with("list of")
            || lower.starts_with("index of");
        if !collides {
            prop_assert!(is_content(&title));
        }
    }

    /// Property: ranking returns at most `cap` items and only items that
    /// were in the input.
    #[test]
    fn prop_rank_respects_cap_and_membership(
        candidates in prop::collection::vec("[a-zA-Z ]{1,30}", 0..60),
        target in "[a-zA-Z ]{1,30}",
        cap in 0usize..20,
    ) {
        let target_words = tokenize(&target);
        let ranked = rank_candidates(candidates.clone(), &target_words, cap);

        prop_assert!(ranked.len() <= cap);
        prop_assert!(ranked.len() <= candidates.len());
        for item in &ranked {
            prop_assert!(candidates.contains(item));
        }
    }

    /// Property: scores are non-increasing through the ranked output.
    #[test]
    fn prop_rank_scores_non_increasing(
        candidates in prop::collection::vec("[a-zA-Z ]{1,30}", 0..40),
        target in "[a-zA-Z ]{1,30}",
    ) {
        let target_words = tokenize(&target);
        let ranked = rank_candidates(candidates, &target_words, 40);

        let scores: Vec<usize> = ranked
            .iter()
            .map(|candidate| relevance(candidate, &target_words))
            .collect();
        for pair in scores.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    /// Property: short titles always score at least the focus bonus.
    #[test]
    fn prop_short_titles_score_at_least_one(
        candidate in "[a-zA-Z]{1,10}( [a-zA-Z]{1,10}){0,3}",
        target in "[a-zA-Z ]{1,30}",
    ) {
        let target_words = tokenize(&target);
        prop_assert!(relevance(&candidate, &target_words) >= 1);
    }

    /// Property: tokenization is lossy but stable: tokenizing twice gives
    /// the same set, and every token is lower case.
    #[test]
    fn prop_tokenize_stable_and_lowercase(title in "[a-zA-Z_ ]{0,40}") {
        let first = tokenize(&title);
        let second = tokenize(&title);
        prop_assert_eq!(&first, &second);
        for word in &first {
            let lowered = word.to_lowercase();
            prop_assert_eq!(word.as_str(), lowered.as_str());
        }
    }

    /// Property: a single-node path validates for any topic, even one the
    /// cache knows nothing about.
    #[test]
    fn prop_single_node_paths_valid(topic in "[a-zA-Z0-9 ]{1,40}") {
        let cache = Arc::new(LinkCache::new(
            Arc::new(StaticLinkSource::new()),
            Arc::new(InMemoryReferenceStore::new()),
        ));
        let validator = PathValidator::new(cache);
        prop_assert!(validator.is_valid(&[topic]));
    }
}
