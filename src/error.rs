//! Recoverable errors for configuration, pool construction and graph validation.
//!
//! Contract violations on the hot path (undersized scratch buffers, a start vertex
//! out of range for the unchecked entry points) are panics, not `BfsError`s.

/// Errors surfaced by the checked entry points of this crate.
#[derive(Debug, thiserror::Error)]
pub enum BfsError {
    /// The worker pool could not be created.
    #[error("failed to build fork-join pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    /// A pool was requested with zero worker threads.
    #[error("parallelism must be > 0")]
    ZeroParallelism,

    /// A fixed sequential cutoff of zero would never reach a base case.
    #[error("fixed block size must be > 0")]
    ZeroBlockSize,

    /// An adjacency list references a vertex that does not exist.
    #[error("edge {from}->{to} is out of bounds for n={node_count}")]
    EdgeOutOfBounds {
        /// Source vertex of the offending entry.
        from: usize,
        /// Target vertex of the offending entry.
        to: usize,
        /// Number of vertices in the graph.
        node_count: usize,
    },

    /// An adjacency list contains `v -> v`.
    #[error("self-loop on vertex {0}")]
    SelfLoop(usize),

    /// `u -> v` is present but `v -> u` is not.
    #[error("adjacency is not symmetric: {from}->{to} has no reverse edge")]
    Asymmetric {
        /// Source vertex of the unmatched entry.
        from: usize,
        /// Target vertex of the unmatched entry.
        to: usize,
    },

    /// The requested cube lattice does not fit in `usize`.
    #[error("cube graph with edge length {0} is too large")]
    CubeTooLarge(usize),

    /// The start vertex is not a vertex of the graph.
    #[error("start vertex {start} is out of bounds for n={node_count}")]
    StartOutOfBounds {
        /// Requested start vertex.
        start: usize,
        /// Number of vertices in the graph.
        node_count: usize,
    },

    /// A run configuration could not be parsed.
    #[error("invalid run configuration: {0}")]
    Config(#[from] serde_json::Error),
}
