//! An explicit adjacency-list graph stored in CSR (compressed sparse row) form.
//!
//! Memory layout:
//! - `offsets`: `Vec<usize>` of length `n + 1` (row offsets)
//! - `targets`: one contiguous `usize` buffer holding every row back to back
//!
//! Rows keep the order of the input lists, so `neighbor(v, k)` is the `k`-th entry
//! of the list given for `v`.

use crate::error::BfsError;
use crate::graph::Graph;

/// A CSR graph built from per-vertex neighbor lists.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Flattens the lists into CSR |
/// | `try_from_adjacency` | \(O(n + \sum \deg^2)\) | Also checks symmetry |
/// | `degree` | \(O(1)\) | Offset difference |
/// | `neighbor` | \(O(1)\) | Direct index |
/// | `has_edge` | \(O(\deg)\) | Linear scan of the row |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl ArrayGraph {
    /// Builds a graph from an adjacency list.
    ///
    /// Symmetry is not checked; use [`try_from_adjacency`](Self::try_from_adjacency)
    /// for untrusted input.
    ///
    /// # Panics
    ///
    /// Panics if any edge references a node index out of bounds.
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Self {
        let n = adjacency.len();

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);

        let mut total = 0usize;
        for nbrs in adjacency {
            total += nbrs.len();
            offsets.push(total);
        }

        let mut targets = Vec::with_capacity(total);
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                assert!(v < n, "edge {u}->{v} is out of bounds for n={n}");
                targets.push(v);
            }
        }

        Self { offsets, targets }
    }

    /// Builds a graph from an adjacency list, rejecting out-of-range targets,
    /// self-loops and asymmetric adjacency.
    pub fn try_from_adjacency(adjacency: &[Vec<usize>]) -> Result<Self, BfsError> {
        let n = adjacency.len();
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                if v >= n {
                    return Err(BfsError::EdgeOutOfBounds {
                        from: u,
                        to: v,
                        node_count: n,
                    });
                }
                if v == u {
                    return Err(BfsError::SelfLoop(u));
                }
            }
        }

        let graph = Self::from_adjacency(adjacency);
        for u in 0..n {
            for v in graph.neighbors(u) {
                if !graph.has_edge(v, u) {
                    return Err(BfsError::Asymmetric { from: u, to: v });
                }
            }
        }
        Ok(graph)
    }

    /// Builds a graph directly from CSR parts.
    ///
    /// # Panics
    /// - if `offsets` is empty
    /// - if offsets are not monotone
    /// - if `offsets.last() != targets.len()`
    /// - if any target is out of bounds
    pub fn from_csr_parts(offsets: Vec<usize>, targets: Vec<usize>) -> Self {
        assert!(!offsets.is_empty(), "offsets must have length n+1");
        let n = offsets.len() - 1;
        assert!(offsets[0] == 0, "offsets must start at 0");
        for w in offsets.windows(2) {
            assert!(w[0] <= w[1], "offsets must be monotone");
        }
        assert!(
            offsets[n] == targets.len(),
            "offsets last must equal targets length"
        );
        for &v in &targets {
            assert!(v < n, "edge to {v} out of bounds for n={n}");
        }
        Self { offsets, targets }
    }

    /// Checks if `to` is a neighbor of `from`.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        assert!(to < self.node_count(), "to vertex {to} out of bounds");
        self.row(from).contains(&to)
    }

    #[inline]
    fn row(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }
}

impl Graph for ArrayGraph {
    fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len() - 1
    }

    fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    #[inline]
    fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    #[inline]
    fn neighbor(&self, node: usize, k: usize) -> usize {
        self.row(node)[k]
    }

    fn degree_sum(&self) -> usize {
        self.targets.len()
    }
}
