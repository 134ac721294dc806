//! Approximate string equality for vehicle make/model deduplication.
//!
//! ## Summary
//! Length-scaled edit-distance matching: short strings tolerate fewer
//! absolute edits than long ones, so "RAV4" vs "Rav 4" matches while
//! "Kia" vs "Audi" does not.

/// Whether two strings are approximately equal.
///
/// Trimmed, case-insensitive exact equality short-circuits to true.
/// Otherwise the Levenshtein distance between the normalized strings must be
/// at most `floor(min(len) / 3)`. Empty inputs never match.
#[must_use]
pub fn is_fuzzy_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let tolerance = a.chars().count().min(b.chars().count()) / 3;
    levenshtein(&a, &b) <= tolerance
}

/// Classic single-character insert/delete/substitute edit distance, unit cost.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
