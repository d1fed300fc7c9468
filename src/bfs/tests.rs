//! Engine-level tests; the cross-variant matrix lives in `tests/bfs_scenarios.rs`.

use super::*;
use crate::graph::{ArrayGraph, CubeGraph};
use crate::parallel::BlockSize;

fn pool(block: usize) -> ForkJoinPool {
    ForkJoinPool::with_block_size(4, BlockSize::Fixed(block)).unwrap()
}

fn path(n: usize) -> ArrayGraph {
    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|v| {
            let mut nbrs = Vec::new();
            if v > 0 {
                nbrs.push(v - 1);
            }
            if v + 1 < n {
                nbrs.push(v + 1);
            }
            nbrs
        })
        .collect();
    ArrayGraph::from_adjacency(&adjacency)
}

#[test]
fn test_sequential_path_from_middle() {
    let g = path(7);
    let mut result = vec![0; 7];
    sequential_bfs(3, &g, &mut result);
    assert_eq!(result, vec![3, 2, 1, 0, 1, 2, 3]);
}

#[test]
fn test_stale_result_is_overwritten() {
    let g = ArrayGraph::from_adjacency(&[vec![1], vec![0], vec![]]);
    let pool = pool(1);

    let mut result = vec![99; 3];
    parallel_bfs(&pool, 0, &g, &mut result);
    assert_eq!(result, vec![0, 1, UNVISITED]);

    let mut scratch = BfsScratch::for_graph(&g);
    let mut result = vec![42; 3];
    parallel_bfs_reuse(&pool, 2, &g, &mut result, &mut scratch);
    assert_eq!(result, vec![UNVISITED, UNVISITED, 0]);
}

#[test]
fn test_reuse_scratch_across_starts() {
    let g = CubeGraph::new(3);
    let pool = pool(2);
    let mut scratch = BfsScratch::for_graph(&g);
    let mut expected = vec![0; g.node_count()];
    let mut got = vec![0; g.node_count()];

    for start in [0, 21, 63, 5] {
        sequential_bfs(start, &g, &mut expected);
        parallel_bfs_reuse(&pool, start, &g, &mut got, &mut scratch);
        assert_eq!(got, expected, "start={start}");
        assert!(scratch.raw.iter().all(|&x| x == 0));
        assert_eq!(scratch.claims().claimed_count(), g.node_count());
    }
}

#[test]
fn test_reuse_recovers_dirty_raw_prefix() {
    let g = path(6);
    let pool = pool(1);
    let mut scratch = BfsScratch::for_graph(&g);

    // State left behind by a run that unwound during expansion.
    scratch.raw[1] = 5;
    scratch.raw[3] = 2;
    scratch.dirty = 4;

    let mut result = vec![0; 6];
    parallel_bfs_reuse(&pool, 0, &g, &mut result, &mut scratch);
    assert_eq!(result, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(scratch.dirty, 0);
    assert!(scratch.raw.iter().all(|&x| x == 0));
}

#[test]
fn test_larger_scratch_serves_smaller_graph() {
    let big = CubeGraph::new(4);
    let small = path(10);
    let pool = pool(3);
    let mut scratch = BfsScratch::for_graph(&big);
    assert!(scratch.fits(&small));

    let mut result = vec![0; 10];
    parallel_bfs_reuse(&pool, 9, &small, &mut result, &mut scratch);
    assert_eq!(result, (0..10).rev().collect::<Vec<i32>>());
}

#[test]
fn test_complete_graph_needs_degree_sum_capacity() {
    // K4 from vertex 0: the level-1 frontier {1, 2, 3} has total degree 9 > 6 edges.
    let k4: Vec<Vec<usize>> = (0..4)
        .map(|v| (0..4).filter(|&u| u != v).collect())
        .collect();
    let g = ArrayGraph::from_adjacency(&k4);
    let pool = pool(1);
    let mut scratch = BfsScratch::for_graph(&g);
    assert_eq!(scratch.degree_capacity(), 12);

    let mut result = vec![0; 4];
    parallel_bfs_reuse(&pool, 0, &g, &mut result, &mut scratch);
    assert_eq!(result, vec![0, 1, 1, 1]);
}

#[test]
#[should_panic(expected = "cannot hold")]
fn test_undersized_raw_buffer_panics() {
    let k4: Vec<Vec<usize>> = (0..4)
        .map(|v| (0..4).filter(|&u| u != v).collect())
        .collect();
    let g = ArrayGraph::from_adjacency(&k4);
    let pool = pool(1);
    let mut scratch = BfsScratch::new(4, g.edge_count());
    let mut result = vec![0; 4];
    parallel_bfs_reuse(&pool, 0, &g, &mut result, &mut scratch);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_start_out_of_range_panics() {
    let g = path(3);
    let mut result = vec![0; 3];
    parallel_bfs(&pool(1), 3, &g, &mut result);
}

#[test]
#[should_panic(expected = "expected 3")]
fn test_result_length_mismatch_panics() {
    let g = path(3);
    let mut result = vec![0; 2];
    sequential_bfs(0, &g, &mut result);
}
