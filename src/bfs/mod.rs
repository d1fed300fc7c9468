//! Single-source BFS distances.
//!
//! - [`sequential_bfs`]: queue-based baseline and correctness oracle
//! - [`parallel_bfs`]: level-synchronous, allocates its level buffers
//! - [`parallel_bfs_reuse`]: level-synchronous, runs entirely in a caller-owned [`BfsScratch`]
//!
//! All three write into a caller-owned distance buffer of length `node_count()`:
//! [`UNVISITED`] for unreachable vertices, `0` at the start, the hop count elsewhere.
//!
//! # Parallel level step
//!
//! Frontier entries are stored 1-based so `0` can mark an empty slot. For a frontier
//! of `F` vertices:
//!
//! 1. **Degrees**: `degs[i] = degree(frontier[i])`.
//! 2. **Offsets**: exclusive scan of `degs`; the total bounds the next frontier.
//! 3. **Expansion**: for neighbor `k` of `frontier[i]`, a successful claim CAS on
//!    the neighbor writes its distance and stores it at `raw[degs[i] + k]`. Lost
//!    claims leave the slot `0`.
//! 4. **Compaction**: the nonzero entries of `raw` become the next frontier.
//!
//! A level is fully joined before the next one starts. Claims only ever go from
//! clear to claimed, so the loop ends after at most `node_count()` levels.

mod parallel;
mod reuse;
mod sequential;

#[cfg(test)]
mod tests;

pub use parallel::{parallel_bfs, parallel_bfs_with_claims};
pub use reuse::{parallel_bfs_reuse, BfsScratch};
pub use sequential::sequential_bfs;

use crate::concurrency::{ClaimSet, DisjointSlice, ForkJoinPool};
use crate::graph::Graph;
use crate::parallel::{parallel_for, parallel_for_each_mut, parallel_scan_sum};

/// Distance of a vertex not reachable from the start.
pub const UNVISITED: i32 = -1;

fn check_run(start: usize, node_count: usize, result_len: usize, claims_len: usize) {
    assert!(
        start < node_count,
        "start vertex {start} out of bounds for n={node_count}"
    );
    assert!(
        result_len == node_count,
        "result buffer has length {result_len}, expected {node_count}"
    );
    assert!(
        claims_len >= node_count,
        "claim array of length {claims_len} is shorter than n={node_count}"
    );
}

/// Resets distances and claims, then claims `start` at distance 0.
fn begin_run<C>(pool: &ForkJoinPool, start: usize, claims: &C, result: &mut [i32])
where
    C: ClaimSet + ?Sized,
{
    parallel_for_each_mut(result, pool.block_for(result.len()), |_, d| *d = UNVISITED);
    parallel_for(claims.len(), pool.block_for(claims.len()), |v| claims.release(v));
    let claimed = claims.try_claim(start);
    debug_assert!(claimed, "start vertex was claimed after reset");
    result[start] = 0;
}

/// Degree pass and offset scan. Returns the frontier's total degree.
fn degree_offsets<G>(graph: &G, frontier: &[usize], degs: &mut [usize], block: usize) -> usize
where
    G: Graph + ?Sized,
{
    parallel_for_each_mut(degs, block, |i, d| *d = graph.degree(frontier[i] - 1));
    parallel_scan_sum(degs, block)
}

/// Expansion pass over one frontier.
#[allow(clippy::too_many_arguments)]
fn expand<G, C>(
    graph: &G,
    frontier: &[usize],
    offsets: &[usize],
    claims: &C,
    result: &DisjointSlice<'_, i32>,
    raw: &DisjointSlice<'_, usize>,
    distance: i32,
    block: usize,
) where
    G: Graph + ?Sized,
    C: ClaimSet + ?Sized,
{
    parallel_for(frontier.len(), block, |i| {
        let v = frontier[i] - 1;
        let base = offsets[i];
        for k in 0..graph.degree(v) {
            let u = graph.neighbor(v, k);
            if claims.try_claim(u) {
                // SAFETY: the winning claim makes this task the only writer of
                // `result[u]` for the whole run, and slot `base + k` belongs to the
                // pair (i, k) alone because `offsets` is an exclusive scan of degrees.
                unsafe {
                    result.write(u, distance);
                    raw.write(base + k, u + 1);
                }
            }
        }
    });
}
