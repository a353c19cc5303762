//! Character shingles and Jaccard similarity.
//!
//! A shingle is a run of exactly `len` consecutive `char`s. Offsets are
//! counted in `char`s, so a shingle never splits a multi-byte character.
//! Repeats inside one document collapse: a document is represented by the
//! *set* of its shingles.

use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;

use crate::SHINGLE_LENGTH;

pub type ShingleSet = HashSet<String, RandomState>;

/// Shingles of [`SHINGLE_LENGTH`] characters.
pub fn shingles(text: &str) -> ShingleSet {
    shingles_with_len(text, SHINGLE_LENGTH)
}

/// Every `len`-character window of `text`, borrowed.
///
/// Yields nothing when `text` has fewer than `len` characters or `len == 0`.
pub fn shingle_text(text: &str, len: usize) -> impl Iterator<Item = &str> + '_ {
    // Byte offset of every char boundary, including the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let count = if len == 0 {
        0
    } else {
        bounds.len().saturating_sub(len)
    };
    (0..count).map(move |i| &text[bounds[i]..bounds[i + len]])
}

pub fn shingles_with_len(text: &str, len: usize) -> ShingleSet {
    let mut set = ShingleSet::default();
    set.extend(shingle_text(text, len).map(str::to_owned));
    set
}

/// `|A ∩ B| / |A ∪ B|`.
///
/// Returns `None` when both sets are empty: the ratio is undefined there and
/// callers have to decide what that means for them.
pub fn jaccard_similarity<T, S>(a: &HashSet<T, S>, b: &HashSet<T, S>) -> Option<f64>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|x| large.contains(*x)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return None;
    }
    Some(intersection as f64 / union as f64)
}
