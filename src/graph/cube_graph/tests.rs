use super::*;

#[test]
fn test_single_vertex_cube() {
    let g = CubeGraph::new(0);
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.degree(0), 0);
}

#[test]
fn test_sizes_match_closed_form() {
    for l in 0..6 {
        let g = CubeGraph::new(l);
        let side = l + 1;
        assert_eq!(g.node_count(), side * side * side);
        assert_eq!(g.edge_count(), 3 * l * side * side);

        let total: usize = (0..g.node_count()).map(|v| g.degree(v)).sum();
        assert_eq!(total, g.degree_sum());
    }
}

#[test]
fn test_corner_and_interior_neighbors() {
    let g = CubeGraph::new(2);
    // Corner (0,0,0): +x, +y, +z.
    assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1, 3, 9]);
    // Center (1,1,1) = 13: -x, +x, -y, +y, -z, +z.
    assert_eq!(g.neighbors(13).collect::<Vec<_>>(), vec![12, 14, 10, 16, 4, 22]);
    // Far corner (2,2,2) = 26.
    assert_eq!(g.neighbors(26).collect::<Vec<_>>(), vec![25, 23, 17]);
}

#[test]
fn test_adjacency_is_symmetric() {
    let g = CubeGraph::new(3);
    for u in 0..g.node_count() {
        for v in g.neighbors(u) {
            assert!(g.neighbors(v).any(|w| w == u), "{u}->{v} has no reverse");
            assert_ne!(u, v);
        }
    }
}

#[test]
fn test_coordinates_round_trip() {
    let g = CubeGraph::new(4);
    let v = g.node_index(1, 2, 3);
    assert_eq!(v, 1 + 2 * 5 + 3 * 25);
    assert_eq!(g.coordinates(v), (1, 2, 3));
}

#[test]
fn test_try_new_overflow() {
    assert!(matches!(
        CubeGraph::try_new(usize::MAX),
        Err(BfsError::CubeTooLarge(_))
    ));
}
