//! Run configuration: which graph to build and which BFS variants to run on it.
//!
//! Everything here is `serde`-serializable so a harness can describe a run as JSON:
//!
//! ```json
//! {
//!   "graph": { "kind": "cube", "edge_length": 50 },
//!   "starts": [0],
//!   "algorithms": [
//!     { "kind": "sequential" },
//!     { "kind": "parallel", "parallelism": 4, "block_size": { "fixed": 2 } },
//!     { "kind": "parallel_reuse", "parallelism": 4 }
//!   ]
//! }
//! ```

use core::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::bfs::{parallel_bfs, parallel_bfs_reuse, sequential_bfs, BfsScratch, UNVISITED};
use crate::concurrency::ForkJoinPool;
use crate::error::BfsError;
use crate::graph::{AnyGraph, ArrayGraph, CubeGraph, Graph};
use crate::parallel::BlockSize;

/// Number of hardware threads, or 1 if it cannot be determined.
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// A BFS variant together with its executor parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// [`sequential_bfs`].
    Sequential,
    /// [`parallel_bfs`] on a pool of `parallelism` workers.
    Parallel {
        /// Worker count.
        #[serde(default = "default_parallelism")]
        parallelism: usize,
        /// Sequential cutoff.
        #[serde(default)]
        block_size: BlockSize,
    },
    /// [`parallel_bfs_reuse`] on a pool of `parallelism` workers.
    ParallelReuse {
        /// Worker count.
        #[serde(default = "default_parallelism")]
        parallelism: usize,
        /// Sequential cutoff.
        #[serde(default)]
        block_size: BlockSize,
    },
}

impl Algorithm {
    /// Runs this variant from `start` and returns the distance array.
    ///
    /// A pool is created for the run and released before returning, whether the
    /// run succeeds or unwinds.
    pub fn run<G>(&self, start: usize, graph: &G) -> Result<Vec<i32>, BfsError>
    where
        G: Graph + ?Sized,
    {
        self.prepare(graph)?.run(start, graph)
    }

    /// Builds the pool and scratch buffers this variant needs for `graph`.
    ///
    /// The returned runner can be reused for many starts, so setup cost stays out
    /// of per-run timings.
    pub fn prepare<G>(&self, graph: &G) -> Result<PreparedRun, BfsError>
    where
        G: Graph + ?Sized,
    {
        let engine = match *self {
            Algorithm::Sequential => Engine::Sequential,
            Algorithm::Parallel {
                parallelism,
                block_size,
            } => Engine::Parallel(ForkJoinPool::with_block_size(parallelism, block_size)?),
            Algorithm::ParallelReuse {
                parallelism,
                block_size,
            } => Engine::ParallelReuse(
                ForkJoinPool::with_block_size(parallelism, block_size)?,
                BfsScratch::for_graph(graph),
            ),
        };
        Ok(PreparedRun { engine })
    }
}

enum Engine {
    Sequential,
    Parallel(ForkJoinPool),
    ParallelReuse(ForkJoinPool, BfsScratch),
}

/// An [`Algorithm`] with its pool and scratch already allocated.
pub struct PreparedRun {
    engine: Engine,
}

impl PreparedRun {
    /// Runs from `start` and returns the distance array.
    ///
    /// Returns [`BfsError::StartOutOfBounds`] for a bad start vertex.
    ///
    /// # Panics
    /// Panics if `graph` is larger than the graph this run was prepared for.
    pub fn run<G>(&mut self, start: usize, graph: &G) -> Result<Vec<i32>, BfsError>
    where
        G: Graph + ?Sized,
    {
        let n = graph.node_count();
        if start >= n {
            return Err(BfsError::StartOutOfBounds {
                start,
                node_count: n,
            });
        }

        let mut result = vec![UNVISITED; n];
        match &mut self.engine {
            Engine::Sequential => sequential_bfs(start, graph, &mut result),
            Engine::Parallel(pool) => parallel_bfs(pool, start, graph, &mut result),
            Engine::ParallelReuse(pool, scratch) => {
                parallel_bfs_reuse(pool, start, graph, &mut result, scratch);
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Sequential => f.write_str("sequential"),
            Algorithm::Parallel {
                parallelism,
                block_size,
            } => write!(f, "parallel(p={parallelism}, block={block_size})"),
            Algorithm::ParallelReuse {
                parallelism,
                block_size,
            } => write!(f, "parallel_reuse(p={parallelism}, block={block_size})"),
        }
    }
}

/// Description of a graph to build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphSpec {
    /// A [`CubeGraph`] lattice.
    Cube {
        /// Lattice edge length.
        edge_length: usize,
    },
    /// An [`ArrayGraph`] from explicit, symmetric neighbor lists.
    Adjacency {
        /// Neighbors of each vertex.
        lists: Vec<Vec<usize>>,
    },
}

/// Builds the graph described by `spec`, validating explicit adjacency.
pub fn build_graph(spec: &GraphSpec) -> Result<AnyGraph, BfsError> {
    match spec {
        GraphSpec::Cube { edge_length } => Ok(CubeGraph::try_new(*edge_length)?.into()),
        GraphSpec::Adjacency { lists } => Ok(ArrayGraph::try_from_adjacency(lists)?.into()),
    }
}

fn default_starts() -> Vec<usize> {
    vec![0]
}

/// A graph, the start vertices to run from, and the variants to compare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Graph to build.
    pub graph: GraphSpec,
    /// Start vertices; defaults to `[0]`.
    #[serde(default = "default_starts")]
    pub starts: Vec<usize>,
    /// Variants to run.
    pub algorithms: Vec<Algorithm>,
}

impl RunConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, BfsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_config() {
        let json = r#"{
            "graph": { "kind": "cube", "edge_length": 2 },
            "algorithms": [
                { "kind": "sequential" },
                { "kind": "parallel", "parallelism": 4, "block_size": { "fixed": 2 } },
                { "kind": "parallel_reuse", "parallelism": 2 }
            ]
        }"#;
        let cfg = RunConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.graph, GraphSpec::Cube { edge_length: 2 });
        assert_eq!(cfg.starts, vec![0]);
        assert_eq!(
            cfg.algorithms[1],
            Algorithm::Parallel {
                parallelism: 4,
                block_size: BlockSize::Fixed(2)
            }
        );
        assert_eq!(
            cfg.algorithms[2],
            Algorithm::ParallelReuse {
                parallelism: 2,
                block_size: BlockSize::Sqrt
            }
        );

        let graph = build_graph(&cfg.graph).unwrap();
        for algo in &cfg.algorithms {
            let result = algo.run(0, &graph).unwrap();
            assert_eq!(result[26], 6, "{algo}");
        }
    }

    #[test]
    fn test_invalid_inputs_are_errors() {
        assert!(matches!(
            RunConfig::from_json_str("{ not json"),
            Err(BfsError::Config(_))
        ));
        assert!(matches!(
            build_graph(&GraphSpec::Adjacency { lists: vec![vec![1], vec![]] }),
            Err(BfsError::Asymmetric { .. })
        ));

        let graph = build_graph(&GraphSpec::Cube { edge_length: 1 }).unwrap();
        assert!(matches!(
            Algorithm::Sequential.run(8, &graph),
            Err(BfsError::StartOutOfBounds { start: 8, node_count: 8 })
        ));
        let zero = Algorithm::Parallel {
            parallelism: 0,
            block_size: BlockSize::Sqrt,
        };
        assert!(matches!(zero.run(0, &graph), Err(BfsError::ZeroParallelism)));
    }

    #[test]
    fn test_prepared_run_serves_many_starts() {
        let graph = build_graph(&GraphSpec::Cube { edge_length: 3 }).unwrap();
        let reuse = Algorithm::ParallelReuse {
            parallelism: 2,
            block_size: BlockSize::Fixed(2),
        };
        let mut prepared = reuse.prepare(&graph).unwrap();
        for start in [0, 63, 21] {
            let expected = Algorithm::Sequential.run(start, &graph).unwrap();
            assert_eq!(prepared.run(start, &graph).unwrap(), expected, "start={start}");
        }
        assert!(matches!(
            prepared.run(64, &graph),
            Err(BfsError::StartOutOfBounds { start: 64, node_count: 64 })
        ));
    }

    #[test]
    fn test_display_names() {
        let a = Algorithm::ParallelReuse {
            parallelism: 4,
            block_size: BlockSize::Fixed(1),
        };
        assert_eq!(a.to_string(), "parallel_reuse(p=4, block=1)");
        assert_eq!(Algorithm::Sequential.to_string(), "sequential");
    }
}
