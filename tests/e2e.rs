//! End-to-end scenarios (§8): one test per module's headline example plus
//! cross-cutting invariant checks that exercise the public API the way a
//! caller would, rather than a module's own internals.

use graphcore::collab::{Graph, Matrix};
use graphcore::flow::{dinic, edmonds_karp, ford_fulkerson, Options as FlowOptions};
use graphcore::grid::{connected_components, expand_island, Connectivity, Grid, Options as GridOptions};
use graphcore::tsp::{self, tour, Algorithm, BoundAlgo, Options as TspOptions};

fn triangle_matrix() -> Matrix {
    let mut m = Matrix::new(3);
    let w = [[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
    for i in 0..3 {
        for j in 0..3 {
            m.set(i, j, w[i][j]).unwrap();
        }
    }
    m
}

fn unit_ring_matrix(n: usize) -> Matrix {
    let mut m = Matrix::new(n);
    for i in 0..n {
        for j in 0..n {
            let d = (i as isize - j as isize).unsigned_abs();
            let w = d.min(n - d) as f64;
            m.set(i, j, w).unwrap();
        }
    }
    m
}

fn convex_hexagon_matrix() -> Matrix {
    // Six points evenly spaced on a unit circle; the convex-hull tour
    // visiting them in angular order is optimal under Euclidean distance.
    let pts: Vec<(f64, f64)> = (0..6)
        .map(|k| {
            let theta = std::f64::consts::PI * f64::from(k) / 3.0;
            (theta.cos(), theta.sin())
        })
        .collect();
    let n = pts.len();
    let mut m = Matrix::new(n);
    for i in 0..n {
        for j in 0..n {
            let (xi, yi) = pts[i];
            let (xj, yj) = pts[j];
            let d = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
            m.set(i, j, d).unwrap();
        }
    }
    m
}

#[test]
fn triangle_optimum_is_exact_under_every_exact_algorithm() {
    let m = triangle_matrix();

    let (_, exact_cost) = tsp::tsp_exact(&m, 0, true).unwrap();
    assert_eq!(exact_cost, 3.0);

    let (_, bnb_cost) = tsp::tsp_branch_and_bound(&m, 0, true, BoundAlgo::SimpleBound, 0.0).unwrap();
    assert_eq!(bnb_cost, 3.0);

    let (_, bnb_1tree_cost) =
        tsp::tsp_branch_and_bound(&m, 0, true, BoundAlgo::OneTreeBound, 0.0).unwrap();
    assert_eq!(bnb_1tree_cost, 3.0);
}

#[test]
fn unit_ring_of_six_has_optimal_cost_six() {
    let m = unit_ring_matrix(6);
    let (tour, cost) = tsp::tsp_exact(&m, 0, true).unwrap();
    assert_eq!(cost, 6.0);
    assert!(tour::validate(&tour, 6, 0).is_ok());
}

#[test]
fn convex_hexagon_two_opt_finds_the_hull_tour() {
    let m = convex_hexagon_matrix();
    let (tour, cost) = tsp::two_opt_only(&m, 0, true).unwrap();
    assert!(tour::validate(&tour, 6, 0).is_ok());

    let (_, exact_cost) = tsp::tsp_exact(&m, 0, true).unwrap();
    assert!((cost - exact_cost).abs() < 1e-9);
}

#[test]
fn three_opt_never_worsens_a_canonical_ring_on_random_instances() {
    // Deterministic pseudo-random-looking instance, no RNG crate needed.
    let n = 8;
    let mut m = Matrix::new(n);
    for i in 0..n {
        for j in 0..n {
            let w = if i == j { 0.0 } else { ((i * 37 + j * 17) % 23 + 1) as f64 };
            m.set(i, j, w).unwrap();
        }
    }
    let baseline = tour::canonical_ring(n, 0);
    let baseline_cost = graphcore::tsp::cost::tour_cost(&m, &baseline).unwrap();

    let opts = TspOptions::default().with_algo(Algorithm::ThreeOptOnly).with_seed(42);
    let (_, improved_cost) = tsp::solve_with_matrix(&m, &opts).unwrap();
    assert!(improved_cost <= baseline_cost + 1e-9);
}

#[test]
fn grid_two_islands_need_a_two_cell_bridge() {
    let rows = vec![
        vec![1, 0, 0, 1],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ];
    let grid = Grid::new(rows, GridOptions::default()).unwrap();

    let comps = connected_components(&grid);
    assert_eq!(comps.get(&1).unwrap().len(), 2);

    let (conversions, path) = expand_island(&grid, &[(0, 0)], &[(3, 0)]).unwrap();
    assert_eq!(conversions, 2);
    assert_eq!(path.first(), Some(&(0, 0)));
    assert_eq!(path.last(), Some(&(3, 0)));

    let core = grid.to_core_graph();
    assert_eq!(core.len(), 12);
}

#[test]
fn grid_eight_connectivity_closes_a_diagonal_gap() {
    let rows = vec![vec![1, 0], vec![0, 1]];
    let four = Grid::new(rows.clone(), GridOptions::default()).unwrap();
    let eight = Grid::new(
        rows,
        GridOptions::default().with_connectivity(Connectivity::Eight),
    )
    .unwrap();

    assert_eq!(connected_components(&four).get(&1).unwrap().len(), 2);
    assert_eq!(connected_components(&eight).get(&1).unwrap().len(), 1);
}

fn three_way_split_graph() -> Graph {
    let mut g = Graph::new(true, true, false, false);
    g.add_edge("a", "b", 5);
    g.add_edge("a", "c", 7);
    g.add_edge("c", "b", 4);
    g
}

#[test]
fn all_three_flow_engines_agree_on_the_three_way_split() {
    let g = three_way_split_graph();
    let opts = FlowOptions::default();

    let (ff, _) = ford_fulkerson(&g, "a", "b", &opts).unwrap();
    let (ek, _) = edmonds_karp(&g, "a", "b", &opts).unwrap();
    let (dn, _) = dinic(&g, "a", "b", &opts).unwrap();

    assert_eq!(ff, 9.0);
    assert_eq!(ek, 9.0);
    assert_eq!(dn, 9.0);
}

#[test]
fn dinic_handles_a_doubled_chain_of_unit_capacities() {
    let mut g = Graph::new(true, true, false, true);
    g.add_edge("s", "m1", 1);
    g.add_edge("m1", "t", 1);
    g.add_edge("s", "m2", 1);
    g.add_edge("m2", "t", 1);

    let (flow, residual) = dinic(&g, "s", "t", &FlowOptions::default()).unwrap();
    assert_eq!(flow, 2.0);
    // Every original edge should be saturated (zero residual capacity left).
    for id in ["s", "m1", "m2", "t"] {
        assert!(residual.has_vertex(id));
    }
}
