//! A synthetic 3-D grid graph used to stress the BFS engines.
//!
//! The lattice has `L + 1` vertices along each axis (`L` = edge length) and vertex
//! `(i1, i2, i3)` is stored at index `i1 + i2*(L+1) + i3*(L+1)^2`. Each vertex is
//! connected to its axis-aligned neighbors, six in the interior and fewer on the
//! boundary.
//!
//! Adjacency is precomputed once into a single flat buffer of variable-length
//! records, `[degree, n_0, n_1, ...]`, plus an offset per vertex pointing at its
//! record. No per-vertex containers are allocated.

use crate::error::BfsError;
use crate::graph::Graph;

/// A `(L+1)^3` lattice graph with a flat record encoding.
#[derive(Clone, Debug)]
pub struct CubeGraph {
    edge_length: usize,
    edge_count: usize,
    records: Vec<usize>,
    record_offsets: Vec<usize>,
}

impl CubeGraph {
    /// Builds the lattice graph for `edge_length`.
    ///
    /// # Panics
    ///
    /// Panics if the lattice size overflows `usize`.
    pub fn new(edge_length: usize) -> Self {
        match Self::try_new(edge_length) {
            Ok(g) => g,
            Err(e) => panic!("{e}"),
        }
    }

    /// Builds the lattice graph, returning an error if its size overflows `usize`.
    pub fn try_new(edge_length: usize) -> Result<Self, BfsError> {
        let side = edge_length
            .checked_add(1)
            .ok_or(BfsError::CubeTooLarge(edge_length))?;
        let face = side
            .checked_mul(side)
            .ok_or(BfsError::CubeTooLarge(edge_length))?;
        let size = face
            .checked_mul(side)
            .ok_or(BfsError::CubeTooLarge(edge_length))?;
        // 3 axes, `edge_length` edges along each of the `face` lines per axis.
        let edge_count = face
            .checked_mul(edge_length)
            .and_then(|x| x.checked_mul(3))
            .ok_or(BfsError::CubeTooLarge(edge_length))?;
        let records_len = edge_count
            .checked_mul(2)
            .and_then(|x| x.checked_add(size))
            .ok_or(BfsError::CubeTooLarge(edge_length))?;

        let mut records = Vec::with_capacity(records_len);
        let mut record_offsets = Vec::with_capacity(size);

        for v in 0..size {
            record_offsets.push(records.len());
            let i1 = v % side;
            let i2 = (v / side) % side;
            let i3 = v / face;
            records.push(axis_degree(i1, side) + axis_degree(i2, side) + axis_degree(i3, side));
            if i1 > 0 {
                records.push(v - 1);
            }
            if i1 + 1 < side {
                records.push(v + 1);
            }
            if i2 > 0 {
                records.push(v - side);
            }
            if i2 + 1 < side {
                records.push(v + side);
            }
            if i3 > 0 {
                records.push(v - face);
            }
            if i3 + 1 < side {
                records.push(v + face);
            }
        }
        debug_assert_eq!(records.len(), records_len);

        Ok(Self {
            edge_length,
            edge_count,
            records,
            record_offsets,
        })
    }

    /// Lattice edge length `L`.
    pub fn edge_length(&self) -> usize {
        self.edge_length
    }

    /// Number of vertices along one axis (`L + 1`).
    pub fn side(&self) -> usize {
        self.edge_length + 1
    }

    /// Flattened index of `(i1, i2, i3)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is greater than the edge length.
    pub fn node_index(&self, i1: usize, i2: usize, i3: usize) -> usize {
        let side = self.side();
        assert!(
            i1 < side && i2 < side && i3 < side,
            "coordinate ({i1}, {i2}, {i3}) out of bounds for side={side}"
        );
        i1 + i2 * side + i3 * side * side
    }

    /// Lattice coordinates of `node`.
    pub fn coordinates(&self, node: usize) -> (usize, usize, usize) {
        assert!(node < self.node_count(), "node {node} out of bounds");
        let side = self.side();
        (node % side, (node / side) % side, node / (side * side))
    }
}

#[inline]
fn axis_degree(i: usize, side: usize) -> usize {
    usize::from(i > 0) + usize::from(i + 1 < side)
}

impl Graph for CubeGraph {
    fn node_count(&self) -> usize {
        self.record_offsets.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    fn degree(&self, node: usize) -> usize {
        self.records[self.record_offsets[node]]
    }

    #[inline]
    fn neighbor(&self, node: usize, k: usize) -> usize {
        let at = self.record_offsets[node];
        debug_assert!(k < self.records[at], "neighbor {k} out of range for node {node}");
        self.records[at + 1 + k]
    }
}

#[cfg(test)]
mod tests;
