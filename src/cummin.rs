//! Chunked cumulative argmins.
//!
//! The input is split into chunks of `c` consecutive values, starting at index 0.
//! Within each chunk we store, for every position, the index of the prefix minimum
//! (forward) or the suffix minimum (reverse).
//! A window of exactly `c` values always covers the suffix of one chunk and the
//! prefix of the next, so a single lookup in each array gives its minimum.
//!
//! Both functions break ties towards the leftmost index:
//! the forward scan only moves on a strictly smaller value,
//! while the reverse scan also moves on equal values, since it visits smaller indices last.

/// For each `i`, the index of the minimum of `values[c*(i/c) ..= i]`.
/// Ties are broken towards the smallest index.
pub fn forward_argcummin<V: Ord>(values: &[V], c: usize) -> Vec<usize> {
    assert!(c > 0);
    let mut argmin = vec![0; values.len()];
    let mut min_idx = 0;
    for (i, val) in values.iter().enumerate() {
        // Start of a new chunk.
        if i % c == 0 || *val < values[min_idx] {
            min_idx = i;
        }
        argmin[i] = min_idx;
    }
    argmin
}

/// For each `i`, the index of the minimum of `values[i ..= c*(i/c + 1) - 1]`,
/// where the last chunk is cut off at the end of the input.
/// Ties are broken towards the smallest index.
pub fn reverse_argcummin<V: Ord>(values: &[V], c: usize) -> Vec<usize> {
    assert!(c > 0);
    let n = values.len();
    let mut argmin = vec![0; n];
    let mut min_idx = n.saturating_sub(1);
    for i in (0..n).rev() {
        // End of a (possibly truncated) chunk.
        if i % c == c - 1 || i == n - 1 || values[i] <= values[min_idx] {
            min_idx = i;
        }
        argmin[i] = min_idx;
    }
    argmin
}
