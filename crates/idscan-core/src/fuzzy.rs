//! Partial-ratio fuzzy scoring.
//!
//! The shorter string is slid across the longer one and each equally long
//! window is compared with normalized Levenshtein similarity. The best window
//! wins, so a verbatim occurrence always scores 100.

use strsim::normalized_levenshtein;

/// Maximum similarity score.
pub const MAX_SCORE: f64 = 100.0;

/// Lowercase and collapse runs of whitespace into single spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive partial-ratio similarity in `[0, 100]`.
///
/// Identical non-empty inputs score 100, even when they are only whitespace.
/// Otherwise returns 0 when either string is empty after normalization.
pub fn similarity(a: &str, b: &str) -> f64 {
    if !a.is_empty() && a == b {
        return MAX_SCORE;
    }

    let a = normalize(a);
    let b = normalize(b);

    let (needle, haystack) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let needle_len = needle.chars().count();
    if needle_len == 0 {
        return 0.0;
    }
    if haystack.contains(needle.as_str()) {
        return MAX_SCORE;
    }

    // Byte offsets of every char boundary, including the end.
    let bounds: Vec<usize> = haystack
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(haystack.len()))
        .collect();
    let haystack_len = bounds.len() - 1;

    let mut best = 0.0f64;
    for start in 0..=(haystack_len - needle_len) {
        let window = &haystack[bounds[start]..bounds[start + needle_len]];
        let score = normalized_levenshtein(&needle, window);
        if score > best {
            best = score;
        }
    }

    best * MAX_SCORE
}

/// How well `needle` occurs inside `haystack`.
///
/// Same as [`similarity`] except that a haystack shorter than the needle is
/// compared whole, so a fragment like "INDIA" does not fully contain
/// "GOVERNMENT OF INDIA".
pub fn containment(haystack: &str, needle: &str) -> f64 {
    let haystack = normalize(haystack);
    let needle = normalize(needle);

    if haystack.is_empty() || needle.is_empty() {
        return 0.0;
    }
    if haystack.chars().count() < needle.chars().count() {
        return normalized_levenshtein(&haystack, &needle) * MAX_SCORE;
    }

    similarity(&haystack, &needle)
}

/// Best similarity of `text` against any of `phrases`, 0 when `phrases` is empty.
pub fn best_similarity<S: AsRef<str>>(text: &str, phrases: &[S]) -> f64 {
    phrases
        .iter()
        .map(|p| similarity(text, p.as_ref()))
        .fold(0.0, f64::max)
}
