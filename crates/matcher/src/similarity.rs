//! Character-bigram similarity for the fuzzy fallback stage.
//!
//! The score is the Dice coefficient over the multiset of adjacent character
//! pairs, after dropping all whitespace:
//!
//! ```text
//! dice(a, b) = 2 * |bigrams(a) ∩ bigrams(b)| / (|bigrams(a)| + |bigrams(b)|)
//! ```
//!
//! It is symmetric, lies in `[0.0, 1.0]`, returns `1.0` for strings that are
//! identical once whitespace is removed and `0.0` when either side has fewer
//! than two characters.

use std::collections::HashMap;

/// Dice coefficient over character bigrams.
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut remaining: HashMap<(char, char), usize> = HashMap::with_capacity(a.len() - 1);
    for pair in a.windows(2) {
        *remaining.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = remaining.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (a.len() + b.len() - 2) as f64
}
