//! Level-synchronous parallel BFS over caller-owned, reusable scratch buffers.

use super::{begin_run, check_run, degree_offsets, expand};
use crate::concurrency::{ClaimArray, ClaimSet, DisjointSlice, ForkJoinPool};
use crate::graph::Graph;
use crate::parallel::{parallel_filter_into, parallel_for_each_mut};

/// Every buffer a [`parallel_bfs_reuse`] run needs.
///
/// | Buffer | Length | Role |
/// |--------|--------|------|
/// | `frontier` | `node_count` | current frontier, 1-based ids |
/// | `degs` | `node_count` | frontier degrees, then write offsets |
/// | `raw` | `degree_sum` | expansion slots, `0` = empty |
/// | `flags` | `degree_sum` | compaction flags / offsets |
/// | `claims` | `node_count` | per-vertex claim flags |
///
/// `degree_sum` (twice the edge count of a symmetric graph) bounds the total degree
/// of any one frontier; `edge_count` alone does not.
///
/// `raw` is all zero between runs. Only the prefix a level actually used is cleared
/// after compaction; if a run unwinds mid-level the next run clears that prefix
/// before starting.
pub struct BfsScratch<C = ClaimArray> {
    frontier: Vec<usize>,
    degs: Vec<usize>,
    pub(super) raw: Vec<usize>,
    flags: Vec<usize>,
    claims: C,
    pub(super) dirty: usize,
}

impl BfsScratch<ClaimArray> {
    /// Allocates scratch for graphs with up to `node_count` vertices and a degree sum
    /// of up to `degree_sum`.
    pub fn new(node_count: usize, degree_sum: usize) -> Self {
        Self::with_claims(node_count, degree_sum, ClaimArray::new(node_count))
    }

    /// Allocates scratch sized for `graph`.
    pub fn for_graph<G>(graph: &G) -> Self
    where
        G: Graph + ?Sized,
    {
        Self::new(graph.node_count(), graph.degree_sum())
    }
}

impl<C: ClaimSet> BfsScratch<C> {
    /// Allocates scratch around an existing claim set.
    ///
    /// # Panics
    /// Panics if `claims` covers fewer than `node_count` vertices.
    pub fn with_claims(node_count: usize, degree_sum: usize, claims: C) -> Self {
        assert!(
            claims.len() >= node_count,
            "claim set of length {} is shorter than n={node_count}",
            claims.len()
        );
        Self {
            frontier: vec![0; node_count],
            degs: vec![0; node_count],
            raw: vec![0; degree_sum],
            flags: vec![0; degree_sum],
            claims,
            dirty: 0,
        }
    }

    /// Maximum number of vertices supported.
    pub fn node_capacity(&self) -> usize {
        self.frontier.len()
    }

    /// Maximum frontier degree sum supported.
    pub fn degree_capacity(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the buffers are large enough for `graph`.
    pub fn fits<G>(&self, graph: &G) -> bool
    where
        G: Graph + ?Sized,
    {
        self.node_capacity() >= graph.node_count()
            && self.claims.len() >= graph.node_count()
            && self.degree_capacity() >= graph.degree_sum()
    }

    /// The claim set left behind by the last run.
    pub fn claims(&self) -> &C {
        &self.claims
    }
}

/// Parallel BFS from `start` that performs no allocation per level or per run.
///
/// # Panics
/// Panics if `start` is out of bounds, `result.len() != graph.node_count()`, or a
/// scratch buffer is too small for `graph`.
pub fn parallel_bfs_reuse<G, C>(
    pool: &ForkJoinPool,
    start: usize,
    graph: &G,
    result: &mut [i32],
    scratch: &mut BfsScratch<C>,
) where
    G: Graph + ?Sized,
    C: ClaimSet,
{
    let n = graph.node_count();
    check_run(start, n, result.len(), scratch.claims.len());
    assert!(
        scratch.node_capacity() >= n,
        "scratch holds {} vertices, graph has {n}",
        scratch.node_capacity()
    );

    let BfsScratch {
        frontier,
        degs,
        raw,
        flags,
        claims,
        dirty,
    } = scratch;

    pool.install(|| {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("parallel_bfs_reuse", start, nodes = n).entered();

        if *dirty > 0 {
            let d = *dirty;
            parallel_for_each_mut(&mut raw[..d], pool.block_for(d), |_, x| *x = 0);
            *dirty = 0;
        }

        begin_run(pool, start, &*claims, result);

        frontier[0] = start + 1;
        let mut len = 1;
        let mut distance = 0i32;
        while len != 0 {
            let block = pool.block_for(len);
            let total = degree_offsets(graph, &frontier[..len], &mut degs[..len], block);
            assert!(
                total <= raw.len(),
                "raw buffer of length {} cannot hold {total} candidates",
                raw.len()
            );

            *dirty = total;
            distance += 1;
            expand(
                graph,
                &frontier[..len],
                &degs[..len],
                &*claims,
                &DisjointSlice::new(result),
                &DisjointSlice::new(&mut raw[..total]),
                distance,
                block,
            );

            #[cfg(feature = "tracing")]
            tracing::trace!(distance, frontier = len, candidates = total, "level expanded");

            let block = pool.block_for(total);
            len = parallel_filter_into(&raw[..total], flags, &mut frontier[..], block, |&x| x != 0);
            parallel_for_each_mut(&mut raw[..total], block, |_, x| *x = 0);
            *dirty = 0;
        }
    });
}
