//! Pure text helpers for echo detection. Kept free of any audio or timing
//! state so the similarity heuristic can be tested in isolation.

/// Lowercase, strip sentence punctuation and trim. Both the system's spoken
/// text and recognized candidates go through this before comparison.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '?' | '!' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Similarity between two normalized strings in `[0.0, 1.0]`.
///
/// Returns 1.0 when the shorter string is a literal substring of the longer
/// one, otherwise the fraction of shared whitespace-delimited words over the
/// smaller word set. Empty input on either side scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() < b.len() { (a, b) } else { (b, a) };
    if longer.contains(shorter) {
        return 1.0;
    }

    let words_a: std::collections::HashSet<&str> = a.split_whitespace().collect();
    let words_b: std::collections::HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let common = words_a.intersection(&words_b).count();
    common as f64 / words_a.len().min(words_b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("  What? No.  "), "what no");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn test_similarity_identical_is_one() {
        assert_eq!(similarity("the sky is blue", "the sky is blue"), 1.0);
    }

    #[test]
    fn test_similarity_substring_is_one() {
        assert_eq!(similarity("sky is", "the sky is blue"), 1.0);
        // symmetric
        assert_eq!(similarity("the sky is blue", "sky is"), 1.0);
    }

    #[test]
    fn test_similarity_empty_is_zero() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("anything", ""), 0.0);
    }

    #[test]
    fn test_similarity_no_shared_words_is_zero() {
        assert_eq!(similarity("red green", "blue yellow"), 0.0);
    }

    #[test]
    fn test_similarity_word_overlap_ratio() {
        // 2 common words over min(3, 3)
        let s = similarity("the blue sky", "the grey sky");
        assert!((s - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_uses_smaller_word_set() {
        // "blue sky" shares both words with the longer text but is not a
        // literal substring; 2 common / min(2, 4) = 1.0
        let s = similarity("blue sky", "sky so very blue");
        assert_eq!(s, 1.0);
    }
}
