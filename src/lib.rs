//! # `forkjoin-bfs` - Fork-Join Primitives and Level-Synchronous Parallel BFS
//!
//! Single-source shortest-path distances (in hops) over large undirected graphs,
//! computed with a level-synchronous breadth-first search built on a small library
//! of divide-and-conquer parallel primitives.
//!
//! ## Key Features
//!
//! - **Parallel primitives**: for-each, reduce, map, Blelloch prefix scan and
//!   scan-then-scatter filter, each a recursive fork-join over an index range
//! - **CAS-arbitrated discovery**: a per-vertex claim array guarantees each vertex
//!   enters exactly one frontier, with no locks anywhere
//! - **Allocation discipline**: a BFS variant that runs entirely in reusable,
//!   caller-owned scratch buffers
//! - **Compact graphs**: CSR adjacency lists and a flat-record 3-D lattice generator
//!
//! ## Architecture
//!
//! 1. **Graphs** ([`Graph`], [`ArrayGraph`], [`CubeGraph`]): immutable, `Sync`,
//!    read concurrently by every worker.
//! 2. **Executor** ([`ForkJoinPool`]): a fixed-size work-stealing pool. Primitives
//!    bisect while a range exceeds the block size and join both halves.
//! 3. **Primitives** ([`parallel`]): exclusive ownership of subranges via
//!    `split_at_mut`; scattered writes with unique targets via [`DisjointSlice`].
//! 4. **BFS** ([`bfs`]): degrees → scan → CAS expansion → compaction, one level at a
//!    time, plus the sequential oracle.
//!
//! ### Concurrency Invariants
//!
//! - The claim array is the only structure written concurrently at arbitrary
//!   indices; a successful CAS is the sole right to write a vertex's distance and
//!   its expansion slot.
//! - Every other buffer index is written by at most one task per level.
//! - Level `k` is joined before level `k + 1` starts.
//! - A panic in a forked task reaches the caller after its sibling finishes; the
//!   pool is released on drop either way.
//!
//! ## Example
//!
//! ```rust
//! use forkjoin_bfs::{parallel_bfs_reuse, BfsScratch, BlockSize, CubeGraph, ForkJoinPool, Graph};
//!
//! let graph = CubeGraph::new(2);
//! let pool = ForkJoinPool::with_block_size(4, BlockSize::Fixed(2)).unwrap();
//! let mut scratch = BfsScratch::for_graph(&graph);
//! let mut result = vec![0; graph.node_count()];
//!
//! parallel_bfs_reuse(&pool, 0, &graph, &mut result, &mut scratch);
//! assert_eq!(result[26], 6);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bfs;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod parallel;

pub use bfs::{
    parallel_bfs, parallel_bfs_reuse, parallel_bfs_with_claims, sequential_bfs, BfsScratch,
    UNVISITED,
};
pub use concurrency::{ClaimArray, ClaimSet, DisjointSlice, ForkJoinPool};
pub use config::{build_graph, Algorithm, GraphSpec, PreparedRun, RunConfig};
pub use error::BfsError;
pub use graph::{AnyGraph, ArrayGraph, CubeGraph, Graph};
pub use parallel::BlockSize;

// Compile-time layout checks for the hot-path types.
const _: () = {
    use core::mem;

    // A disjoint view is exactly a fat slice pointer.
    assert!(mem::size_of::<DisjointSlice<'static, usize>>() == mem::size_of::<&mut [usize]>());

    // One byte per claim flag.
    assert!(mem::size_of::<core::sync::atomic::AtomicBool>() == 1);
};
