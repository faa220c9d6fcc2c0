//! String collation for grid sorting.
//!
//! A three-level comparison tuned for the Hebrew-first dataset:
//! 1. primary: case-folded text with Hebrew points and cantillation removed
//! 2. secondary: case-folded text with marks kept
//! 3. tertiary: the raw text
//!
//! Pointed and unpointed spellings of a Hebrew word therefore sort together,
//! as do `Apple` and `apple`, while the order stays total.

use std::cmp::Ordering;

/// Hebrew cantillation marks, points, and punctuation marks that ICU treats as
/// ignorable at the primary level.
const fn is_hebrew_mark(ch: char) -> bool {
    matches!(ch, '\u{0591}'..='\u{05BD}' | '\u{05BF}' | '\u{05C1}'..='\u{05C2}' | '\u{05C4}'..='\u{05C5}' | '\u{05C7}')
}

fn primary_key(s: &str) -> String {
    s.chars()
        .filter(|ch| !is_hebrew_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two strings for display ordering.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}
