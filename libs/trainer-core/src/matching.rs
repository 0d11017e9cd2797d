//! Answer matching for typed guesses.

use crate::types::Specimen;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Similarity a guess needs to be accepted.
///
/// A single edit on a six letter name ("qurtz" for "quartz", 0.833) is
/// rejected; one typo in a name of eight or more letters passes.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.86;

/// Result of checking a guess against a specimen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the guess is considered correct.
    pub ok: bool,
    /// The accepted name closest to the guess, as written in the catalog.
    pub best_match: Option<String>,
    /// Similarity score between 0.0 and 1.0.
    pub score: f64,
}

impl MatchResult {
    fn blank() -> Self {
        Self {
            ok: false,
            best_match: None,
            score: 0.0,
        }
    }
}

/// Canonicalize free text for comparison.
///
/// Lowercases, strips diacritics, drops everything except ASCII letters,
/// digits, whitespace and hyphens, then collapses whitespace.
pub fn normalize(text: &str) -> String {
    let filtered: String = text
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Levenshtein distance between two strings after normalization.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    edit_distance(&normalize(a), &normalize(b))
}

/// Similarity in `[0, 1]` derived from the edit distance of the normalized
/// strings. Two strings that both normalize to nothing are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count()).max(1);
    let distance = edit_distance(&a, &b);
    1.0 - (distance as f64 / max_len as f64)
}

/// Check a typed guess against a specimen's display name and aliases.
pub fn verify_answer(guess: &str, specimen: &Specimen, threshold: f64) -> MatchResult {
    let input = normalize(guess);
    if input.is_empty() {
        return MatchResult::blank();
    }

    let mut best = specimen.display.as_str();
    let mut best_score = -1.0;

    for candidate in specimen.accepted_names() {
        let score = similarity(&input, candidate);
        // Strictly greater, so the earliest candidate keeps ties.
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }

    MatchResult {
        ok: best_score >= threshold,
        best_match: Some(best.to_string()),
        score: best_score,
    }
}

/// Levenshtein distance over already-normalized input.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows of the (m+1) x (n+1) table are enough
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
