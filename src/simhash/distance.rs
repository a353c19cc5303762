//! Comparing fingerprints.

/// Number of bit positions at which `a` and `b` differ, in `0..=64`.
///
/// Clears the lowest set bit of `a ^ b` until nothing is left (Kernighan).
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    let mut bits = a ^ b;
    let mut count = 0;
    while bits != 0 {
        bits &= bits - 1;
        count += 1;
    }
    count
}

/// Circular left rotation by one bit: the top bit re-enters at bit 0.
///
/// Callers that band fingerprints for candidate retrieval rotate between
/// bands; no banding index lives here.
#[inline]
pub fn rotate(value: u64) -> u64 {
    (value << 1) | (value >> 63)
}
