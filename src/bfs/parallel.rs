//! Level-synchronous parallel BFS that allocates fresh buffers for every level.

use super::{begin_run, check_run, degree_offsets, expand};
use crate::concurrency::{ClaimArray, ClaimSet, DisjointSlice, ForkJoinPool};
use crate::graph::Graph;
use crate::parallel::parallel_filter;

/// Parallel BFS from `start`, writing distances into `result`.
///
/// Allocates a claim array for the run plus `degs`, a raw expansion buffer and the
/// next frontier on every level. See [`parallel_bfs_reuse`](super::parallel_bfs_reuse)
/// for the allocation-free variant.
///
/// # Panics
/// Panics if `start` is out of bounds or `result.len() != graph.node_count()`.
pub fn parallel_bfs<G>(pool: &ForkJoinPool, start: usize, graph: &G, result: &mut [i32])
where
    G: Graph + ?Sized,
{
    let claims = ClaimArray::new(graph.node_count());
    parallel_bfs_with_claims(pool, start, graph, &claims, result);
}

/// [`parallel_bfs`] with a caller-supplied claim set.
///
/// The claims are cleared at the start of the run; afterwards exactly the reachable
/// vertices are claimed.
///
/// # Panics
/// Panics if `start` is out of bounds, `result.len() != graph.node_count()`, or
/// `claims` covers fewer than `node_count()` vertices.
pub fn parallel_bfs_with_claims<G, C>(
    pool: &ForkJoinPool,
    start: usize,
    graph: &G,
    claims: &C,
    result: &mut [i32],
) where
    G: Graph + ?Sized,
    C: ClaimSet + ?Sized,
{
    let n = graph.node_count();
    check_run(start, n, result.len(), claims.len());

    pool.install(|| {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("parallel_bfs", start, nodes = n).entered();

        begin_run(pool, start, claims, result);

        let mut frontier = vec![start + 1];
        let mut distance = 0i32;
        while !frontier.is_empty() {
            let block = pool.block_for(frontier.len());
            let mut degs = vec![0usize; frontier.len()];
            let total = degree_offsets(graph, &frontier, &mut degs, block);

            let mut raw = vec![0usize; total];
            distance += 1;
            expand(
                graph,
                &frontier,
                &degs,
                claims,
                &DisjointSlice::new(result),
                &DisjointSlice::new(&mut raw),
                distance,
                block,
            );

            #[cfg(feature = "tracing")]
            tracing::trace!(distance, frontier = frontier.len(), candidates = total, "level expanded");

            frontier = parallel_filter(&raw, pool.block_for(total), |&x| x != 0);
        }
    });
}
