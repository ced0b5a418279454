//! String similarity scoring for near-duplicate detection.
//!
//! Scores are normalized edit-distance ratios in `[0, 100]`: identical
//! strings score 100, completely unrelated strings approach 0. The ratio
//! is symmetric in its arguments.

/// Default similarity threshold (percent) above which two records are
/// considered near-duplicates.
pub const DEFAULT_THRESHOLD: f64 = 85.0;

/// Similarity ratio between two strings, in `[0, 100]`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Find the best-matching string in `corpus` for `candidate`.
///
/// Scans the full corpus and returns the entry with the highest ratio.
/// Ties keep the earliest entry. Returns `None` for an empty corpus.
pub fn best_match<'a, I>(candidate: &str, corpus: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for entry in corpus {
        let score = ratio(candidate, entry);
        match best {
            Some((_, current)) if current >= score => {}
            _ => best = Some((entry, score)),
        }
    }
    best
}

/// Score `candidate` against a corpus.
///
/// Returns the best match (if any) and its ratio. An empty corpus scores 0,
/// meaning the candidate is automatically unique.
pub fn score<'a, I>(candidate: &str, corpus: I) -> (Option<&'a str>, f64)
where
    I: IntoIterator<Item = &'a str>,
{
    match best_match(candidate, corpus) {
        Some((entry, ratio)) => (Some(entry), ratio),
        None => (None, 0.0),
    }
}

/// Check whether `candidate` is a near-duplicate of anything in `corpus`.
pub fn is_near_duplicate<'a, I>(candidate: &str, corpus: I, threshold: f64) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let (_, best) = score(candidate, corpus);
    best >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical() {
        let r = ratio("The cat sat.", "The cat sat.");
        assert!(
            (r - 100.0).abs() < f64::EPSILON,
            "identical strings should score 100, got {r}"
        );
    }

    #[test]
    fn test_ratio_symmetric() {
        let a = "The quick brown fox";
        let b = "The quick brown cat";
        assert!((ratio(a, b) - ratio(b, a)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_close_variants() {
        // One character of punctuation difference on a 12-char string.
        let r = ratio("The cat sat.", "The cat sat!");
        assert!(r >= 85.0, "close variants should score high, got {r}");
    }

    #[test]
    fn test_ratio_different_strings() {
        let r = ratio("The cat sat.", "Completely different text.");
        assert!(r < 50.0, "unrelated strings should score low, got {r}");
    }

    #[test]
    fn test_score_empty_corpus() {
        let corpus: Vec<String> = Vec::new();
        let (best, score) = score("anything", corpus.iter().map(String::as_str));
        assert!(best.is_none());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_best_match_picks_maximum() {
        let corpus = vec![
            "totally unrelated entry".to_string(),
            "The cat sat!".to_string(),
            "another unrelated one".to_string(),
        ];
        let (best, score) = best_match("The cat sat.", corpus.iter().map(String::as_str)).unwrap();
        assert_eq!(best, "The cat sat!");
        assert!(score >= 85.0);
    }

    #[test]
    fn test_best_match_tie_keeps_first() {
        let corpus = vec!["same".to_string(), "same".to_string()];
        let (best, _) = best_match("same", corpus.iter().map(String::as_str)).unwrap();
        // Both entries score 100; the first one wins.
        assert!(std::ptr::eq(best, corpus[0].as_str()));
    }

    #[test]
    fn test_is_near_duplicate_threshold_boundary() {
        let corpus = vec!["The cat sat.".to_string()];
        // Identical content scores exactly 100, which meets any threshold <= 100.
        assert!(is_near_duplicate(
            "The cat sat.",
            corpus.iter().map(String::as_str),
            100.0
        ));
        assert!(!is_near_duplicate(
            "Completely different text.",
            corpus.iter().map(String::as_str),
            85.0
        ));
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let corpus = vec!["alpha beta gamma".to_string(), "delta epsilon".to_string()];
        let first = score("alpha beta gamm", corpus.iter().map(String::as_str));
        let second = score("alpha beta gamm", corpus.iter().map(String::as_str));
        assert_eq!(first.1, second.1);
        assert_eq!(first.0, second.0);
    }
}
