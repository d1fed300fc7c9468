use std::collections::VecDeque;

use super::UNVISITED;
use crate::graph::Graph;

/// Single-threaded queue-based BFS from `start`.
///
/// **Time complexity**: \(O(n + m)\)
/// **Space complexity**: \(O(n)\) for the queue
///
/// # Panics
/// Panics if `start` is out of bounds or `result.len() != graph.node_count()`.
pub fn sequential_bfs<G>(start: usize, graph: &G, result: &mut [i32])
where
    G: Graph + ?Sized,
{
    let n = graph.node_count();
    assert!(start < n, "start vertex {start} out of bounds for n={n}");
    assert!(
        result.len() == n,
        "result buffer has length {}, expected {n}",
        result.len()
    );

    result.fill(UNVISITED);
    result[start] = 0;

    let mut queue = VecDeque::with_capacity(64);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        let next = result[u] + 1;
        for k in 0..graph.degree(u) {
            let v = graph.neighbor(u, k);
            if result[v] == UNVISITED {
                result[v] = next;
                queue.push_back(v);
            }
        }
    }
}
