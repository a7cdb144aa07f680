//! Sliding window argmins: for each window of `w` consecutive values, the position of its minimum.
//!
//! All variants break ties towards the leftmost position and return one position per
//! window, i.e. `values.len() - w + 1` positions. They are not deduplicated.

use std::collections::VecDeque;

use crate::cummin::{forward_argcummin, reverse_argcummin};

/// Combine chunked forward and reverse argmins into the argmin of each window.
///
/// Window `[s, s+w)` is covered by the suffix of the chunk containing `s`, whose
/// minimum is `argmin_rev[s]`, and the prefix of the next chunk up to `s+w-1`, whose
/// minimum is `argmin_fwd[s+w-1]`. When `s` is a chunk start both cover the full window.
///
/// The reverse candidate is never to the right of the forward candidate, so on ties we take it.
#[inline(always)]
pub fn combine_window_argmins<'a, V: Ord>(
    argmin_fwd: &'a [usize],
    argmin_rev: &'a [usize],
    values: &'a [V],
    w: usize,
) -> impl ExactSizeIterator<Item = usize> + 'a {
    assert!(w > 0);
    assert_eq!(argmin_fwd.len(), values.len());
    assert_eq!(argmin_rev.len(), values.len());
    let num_windows = if values.len() >= w {
        values.len() - w + 1
    } else {
        0
    };
    (0..num_windows).map(move |s| {
        let fwd = argmin_fwd[s + w - 1];
        let rev = argmin_rev[s];
        if values[fwd] < values[rev] {
            fwd
        } else {
            rev
        }
    })
}

/// Position of the minimum of each window of size `w`, in O(n) total time.
///
/// Runs a forward and a reverse chunked argmin with chunk size `w` and combines them.
pub fn window_argmins<V: Ord>(values: &[V], w: usize) -> Vec<usize> {
    let argmin_fwd = forward_argcummin(values, w);
    let argmin_rev = reverse_argcummin(values, w);
    combine_window_argmins(&argmin_fwd, &argmin_rev, values, w).collect()
}

/// Sliding argmin using a monotone queue.
///
/// The queue holds (position, value) pairs, increasing in position and non-decreasing in value,
/// so that the front is the leftmost minimum of the current window.
pub fn queue_window_argmins<V: Ord + Copy>(values: &[V], w: usize) -> Vec<usize> {
    assert!(w > 0);
    let mut q = VecDeque::<(usize, V)>::new();
    let mut argmins = Vec::with_capacity(values.len().saturating_sub(w - 1));
    for (pos, &val) in values.iter().enumerate() {
        // Strictly larger preceding values can never be a minimum again.
        // Equal values are kept so that the leftmost one stays in front.
        while q.back().is_some_and(|back| back.1 > val) {
            q.pop_back();
        }
        q.push_back((pos, val));
        if pos + 1 < w {
            continue;
        }
        // Drop positions that fell out of the window.
        let start = pos + 1 - w;
        while q.front().is_some_and(|front| front.0 < start) {
            q.pop_front();
        }
        if let Some(&(min_pos, _)) = q.front() {
            argmins.push(min_pos);
        }
    }
    argmins
}

/// Rescan every window. O(n*w); only for testing and benchmarking.
pub fn naive_window_argmins<V: Ord>(values: &[V], w: usize) -> Vec<usize> {
    assert!(w > 0);
    values
        .windows(w)
        .enumerate()
        .map(|(s, window)| {
            // `min_by_key` returns the first of equal minima.
            s + window
                .iter()
                .enumerate()
                .min_by_key(|&(_, val)| val)
                .map_or(0, |(i, _)| i)
        })
        .collect()
}
