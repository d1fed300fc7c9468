//! Order-preserving stream compaction by scan-then-scatter.
//!
//! 1. Map each element to a 0/1 flag.
//! 2. Exclusive-scan the flags; `flags[i]` becomes element `i`'s destination.
//! 3. Element `i < n-1` survives iff `flags[i+1] == flags[i] + 1`; it is written to
//!    `dst[flags[i]]`. The last element has no successor and survives iff
//!    `total - flags[n-1] == 1`.
//!
//! Destinations of survivors are strictly increasing, so the scatter writes every
//! output slot exactly once.

use core::mem::MaybeUninit;

use super::{map::parallel_map, map::parallel_map_into, parallel_for, scan::parallel_scan_sum};
use crate::concurrency::DisjointSlice;

/// Returns the elements of `data` satisfying `predicate`, in their original order.
pub fn parallel_filter<T, P>(data: &[T], block: usize, predicate: P) -> Vec<T>
where
    T: Copy + Send + Sync,
    P: Fn(&T) -> bool + Sync,
{
    if data.is_empty() {
        return Vec::new();
    }
    let mut flags = parallel_map(data, block, |x| usize::from(predicate(x)));
    let kept = parallel_scan_sum(&mut flags, block);

    let mut out: Vec<T> = Vec::with_capacity(kept);
    {
        let dst = DisjointSlice::new(&mut out.spare_capacity_mut()[..kept]);
        scatter(data, &flags, kept, block, |i, x| {
            // SAFETY: survivor destinations are distinct (strictly increasing).
            unsafe { dst.write(i, MaybeUninit::new(x)) };
        });
    }
    // SAFETY: the scatter wrote every slot in `0..kept`.
    unsafe { out.set_len(kept) };
    out
}

/// Compacts the elements of `data` satisfying `predicate` into the front of `dst`
/// and returns how many were kept.
///
/// `flags` is scratch space for the per-element flags and offsets; nothing is
/// allocated.
///
/// # Panics
/// Panics if `flags` is shorter than `data`, or `dst` is shorter than the number of
/// surviving elements.
pub fn parallel_filter_into<T, P>(
    data: &[T],
    flags: &mut [usize],
    dst: &mut [T],
    block: usize,
    predicate: P,
) -> usize
where
    T: Copy + Send + Sync,
    P: Fn(&T) -> bool + Sync,
{
    let n = data.len();
    if n == 0 {
        return 0;
    }
    assert!(
        flags.len() >= n,
        "flag buffer of length {} is shorter than input of length {n}",
        flags.len()
    );
    let flags = &mut flags[..n];
    parallel_map_into(data, flags, block, |x| usize::from(predicate(x)));
    let kept = parallel_scan_sum(flags, block);
    assert!(
        dst.len() >= kept,
        "destination of length {} cannot hold {kept} elements",
        dst.len()
    );

    let out = DisjointSlice::new(dst);
    scatter(data, flags, kept, block, |i, x| {
        // SAFETY: survivor destinations are distinct (strictly increasing).
        unsafe { out.write(i, x) };
    });
    kept
}

fn scatter<T, W>(data: &[T], offsets: &[usize], kept: usize, block: usize, write: W)
where
    T: Copy + Sync,
    W: Fn(usize, T) + Sync,
{
    if kept == 0 {
        return;
    }
    let last = data.len() - 1;
    parallel_for(last, block, |i| {
        if offsets[i + 1] == offsets[i] + 1 {
            write(offsets[i], data[i]);
        }
    });
    if kept - offsets[last] == 1 {
        write(kept - 1, data[last]);
    }
}
