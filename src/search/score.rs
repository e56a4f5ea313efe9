//! Relevance scoring for frontier candidates.
//!
//! The search cannot afford to expand every neighbor of every node, so
//! candidates are ranked by a cheap lexical heuristic: word overlap with the
//! target title, with a flat bonus for short, focused titles. Short titles
//! tend to be broad hub articles that make good connective tissue, while
//! long compound titles are usually leaves.
//!
//! Kept as pure functions, independent of the traversal loop, so the
//! ranking policy can be tested in isolation.

use std::collections::HashSet;

/// Word count at or below which a title earns the focus bonus.
const FOCUS_BONUS_WORDS: usize = 4;

/// Tokenizes a title into lower-cased words.
///
/// Underscores are treated as spaces; Wikipedia uses them interchangeably
/// in URLs and titles.
#[must_use]
pub fn tokenize(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// Scores a candidate title against the tokenized target.
///
/// The score is the number of words shared with the target, plus 1 if the
/// candidate has at most [`FOCUS_BONUS_WORDS`] words.
#[must_use]
pub fn relevance(candidate: &str, target_words: &HashSet<String>) -> usize {
    let candidate_words = tokenize(candidate);
    let overlap = candidate_words
        .iter()
        .filter(|word| target_words.contains(*word))
        .count();

    let word_count = candidate.split_whitespace().count();
    if word_count <= FOCUS_BONUS_WORDS {
        overlap + 1
    } else {
        overlap
    }
}

/// Ranks candidates and keeps the best `cap`.
///
/// Ordering is descending score, tie-broken by ascending title length, with
/// the incoming order preserved for full ties (the sort is stable). The cap
/// is the pruning policy that keeps fan-out bounded on hub pages with
/// hundreds of edges.
#[must_use]
pub fn rank_candidates(
    mut candidates: Vec<String>,
    target_words: &HashSet<String>,
    cap: usize,
) -> Vec<String> {
    let mut scored: Vec<(usize, String)> = candidates
        .drain(..)
        .map(|candidate| (relevance(&candidate, target_words), candidate))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.len().cmp(&b.1.len())));
    scored.truncate(cap);
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let words = tokenize("Albert_Einstein in Ulm");
        assert!(words.contains("albert"));
        assert!(words.contains("einstein"));
        assert!(words.contains("in"));
        assert!(words.contains("ulm"));
        assert_eq!(words.len(), 4);
    }

    #[test]
    fn test_relevance_counts_overlap() {
        let target = tokenize("History of quantum mechanics and field theory");
        // "quantum" and "mechanics" overlap, plus the short-title bonus
        assert_eq!(relevance("Quantum mechanics", &target), 3);
        // No overlap, short-title bonus only
        assert_eq!(relevance("Kevin Bacon", &target), 1);
    }

    #[test]
    fn test_relevance_long_title_gets_no_bonus() {
        let target = tokenize("Physics");
        let long = "A very long title about the history of physics";
        assert_eq!(relevance(long, &target), 1); // "physics" overlap, no bonus
        assert_eq!(relevance("Physics topics", &target), 2); // overlap + bonus
    }

    #[test]
    fn test_rank_orders_by_score_then_length() {
        let target = tokenize("Quantum field theory");
        let ranked = rank_candidates(
            vec![
                "Unrelated but quite long title here".to_string(),
                "Quantum field theory in curved spacetime".to_string(),
                "Field theory".to_string(),
                "Cheese".to_string(),
            ],
            &target,
            10,
        );

        // "Field theory": 2 overlaps + bonus = 3
        // "Quantum field theory in curved spacetime": 3 overlaps, no bonus = 3, longer
        // "Cheese": bonus only = 1, shorter than the unrelated long title
        assert_eq!(
            ranked,
            vec![
                "Field theory".to_string(),
                "Quantum field theory in curved spacetime".to_string(),
                "Cheese".to_string(),
                "Unrelated but quite long title here".to_string(),
            ]
        );
    }

    #[test]
    fn test_rank_applies_cap() {
        let target = tokenize("Target");
        let candidates: Vec<String> = (0..50).map(|i| format!("Candidate {i:02}")).collect();
        let ranked = rank_candidates(candidates, &target, 10);
        assert_eq!(ranked.len(), 10);
    }

    #[test]
    fn test_rank_stable_for_full_ties() {
        let target = tokenize("Zzz");
        // Same score, same length: incoming order must be preserved
        let ranked = rank_candidates(
            vec!["Abc".to_string(), "Def".to_string(), "Ghi".to_string()],
            &target,
            2,
        );
        assert_eq!(ranked, vec!["Abc".to_string(), "Def".to_string()]);
    }

    #[test]
    fn test_rank_empty_input() {
        let target = tokenize("Anything");
        assert!(rank_candidates(Vec::new(), &target, 10).is_empty());
    }
}
