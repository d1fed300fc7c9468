//! Concurrency building blocks for the fork-join primitives and the BFS engines.
//!
//! Important: only [`ClaimArray`] is mutated concurrently from arbitrary indices.
//! Every other shared buffer is either split by exclusive ownership per subtask or
//! written through a [`DisjointSlice`] at indices that are unique by construction.

pub mod claim;
pub mod disjoint;
pub mod pool;

pub use claim::{ClaimArray, ClaimSet};
pub use disjoint::DisjointSlice;
pub use pool::ForkJoinPool;
