//! Read-only graph capabilities consumed by the BFS engines.
//!
//! Graph implementations:
//! - `array_graph`: explicit adjacency lists stored in CSR form
//! - `cube_graph`: a procedurally generated 3-D lattice with a flat record encoding
//!
//! Both are immutable after construction and `Sync`, so `degree`/`neighbor` may be
//! called from any number of worker threads at once.

pub mod array_graph;
pub mod cube_graph;

pub use array_graph::ArrayGraph;
pub use cube_graph::CubeGraph;

/// An undirected graph over vertices `0..node_count()`.
///
/// Adjacency must be symmetric and free of self-loops for BFS distances to be
/// meaningful. Out-of-range vertex ids are caller bugs and panic.
pub trait Graph: Sync {
    /// Number of vertices.
    fn node_count(&self) -> usize;

    /// Number of undirected edges.
    fn edge_count(&self) -> usize;

    /// Number of neighbors of `node`.
    fn degree(&self, node: usize) -> usize;

    /// The `k`-th neighbor of `node`, for `k < degree(node)`.
    fn neighbor(&self, node: usize, k: usize) -> usize;

    /// Sum of all vertex degrees.
    ///
    /// This bounds the total degree of any single BFS frontier and therefore sizes
    /// the raw expansion buffers. Equal to `2 * edge_count()` for symmetric graphs.
    fn degree_sum(&self) -> usize {
        2 * self.edge_count()
    }

    /// Iterator over the neighbors of `node`.
    fn neighbors(&self, node: usize) -> Neighbors<'_, Self>
    where
        Self: Sized,
    {
        Neighbors::new(self, node)
    }
}

/// Iterator over a vertex's neighbors, driven by [`Graph::neighbor`].
pub struct Neighbors<'a, G: ?Sized> {
    graph: &'a G,
    node: usize,
    next: usize,
    end: usize,
}

impl<'a, G: Graph + ?Sized> Neighbors<'a, G> {
    /// Creates an iterator over the neighbors of `node`.
    pub fn new(graph: &'a G, node: usize) -> Self {
        let end = graph.degree(node);
        Self {
            graph,
            node,
            next: 0,
            end,
        }
    }
}

impl<G: Graph + ?Sized> Iterator for Neighbors<'_, G> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.next == self.end {
            return None;
        }
        let v = self.graph.neighbor(self.node, self.next);
        self.next += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.end - self.next;
        (rest, Some(rest))
    }
}

impl<G: Graph + ?Sized> ExactSizeIterator for Neighbors<'_, G> {}

/// A graph built from a [`GraphSpec`](crate::config::GraphSpec).
///
/// Enum dispatch keeps the traversal loops monomorphic over the two concrete layouts.
pub enum AnyGraph {
    /// Explicit adjacency lists.
    Array(ArrayGraph),
    /// Procedural 3-D lattice.
    Cube(CubeGraph),
}

impl Graph for AnyGraph {
    fn node_count(&self) -> usize {
        match self {
            AnyGraph::Array(g) => g.node_count(),
            AnyGraph::Cube(g) => g.node_count(),
        }
    }

    fn edge_count(&self) -> usize {
        match self {
            AnyGraph::Array(g) => g.edge_count(),
            AnyGraph::Cube(g) => g.edge_count(),
        }
    }

    #[inline]
    fn degree(&self, node: usize) -> usize {
        match self {
            AnyGraph::Array(g) => g.degree(node),
            AnyGraph::Cube(g) => g.degree(node),
        }
    }

    #[inline]
    fn neighbor(&self, node: usize, k: usize) -> usize {
        match self {
            AnyGraph::Array(g) => g.neighbor(node, k),
            AnyGraph::Cube(g) => g.neighbor(node, k),
        }
    }

    fn degree_sum(&self) -> usize {
        match self {
            AnyGraph::Array(g) => g.degree_sum(),
            AnyGraph::Cube(g) => g.degree_sum(),
        }
    }
}

impl From<ArrayGraph> for AnyGraph {
    fn from(g: ArrayGraph) -> Self {
        AnyGraph::Array(g)
    }
}

impl From<CubeGraph> for AnyGraph {
    fn from(g: CubeGraph) -> Self {
        AnyGraph::Cube(g)
    }
}
