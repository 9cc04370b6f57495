//! Exact branch-and-bound (§4.10): depth-first search over partial tours
//! with admissible pruning, seeded by a fast heuristic upper bound.

use crate::collab::Matrix;
use crate::deadline::{Cadence, Deadline};
use crate::error::TspError;

use super::bounds::{min_out_in, one_tree_bound, simple_bound};
use super::christofides::christofides;
use super::cost::{edge_cost, stabilize, tour_cost};
use super::local_search::two_opt::two_opt;
use super::matching::{add_matching, odd_vertices};
use super::mst::prim_mst;
use super::options::{BoundAlgo, ImprovementPolicy, MatchingAlgo, Options};
use super::tour::{canonical_ring, canonicalize_orientation, close_from_permutation, validate, Tour};

const DEADLINE_CADENCE: u64 = 4096;

/// Run exact branch-and-bound from `opts.start_vertex`.
///
/// # Errors
/// [`TspError::TimeLimit`] if `opts.time_budget_secs` elapses before the
/// search completes; [`TspError::IncompleteGraph`] if no Hamiltonian
/// cycle exists.
pub fn branch_and_bound(dist: &Matrix, opts: &Options) -> Result<(Tour, f64), TspError> {
    let n = dist.rows();
    let start = opts.start_vertex;
    let deadline = Deadline::from_budget_secs(opts.time_budget_secs);

    if n == 1 {
        return Ok((vec![start, start], 0.0));
    }

    let mut w = vec![f64::INFINITY; n * n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            w[i * n + j] = edge_cost(dist, i, j).unwrap_or(f64::INFINITY);
        }
    }

    // Per-row neighbor order, cheapest first, index tie-break.
    let mut neighbor_order = vec![Vec::with_capacity(n - 1); n];
    for (i, row) in neighbor_order.iter_mut().enumerate() {
        let mut js: Vec<usize> = (0..n).filter(|&j| j != i).collect();
        js.sort_by(|&a, &b| {
            w[i * n + a]
                .partial_cmp(&w[i * n + b])
                .unwrap()
                .then(a.cmp(&b))
        });
        *row = js;
    }

    let (min_out, min_in) = min_out_in(dist)?;

    let ub_seed = seed_upper_bound(dist, opts)?;
    let mut best_cost = ub_seed.1;
    let mut best_tour = ub_seed.0;

    let one_tree_root_bound = if matches!(opts.bound_algo, BoundAlgo::OneTreeBound) && opts.symmetric {
        Some(one_tree_bound(dist, start, Some(best_cost), deadline)?)
    } else {
        None
    };

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut outgoing_fixed = vec![false; n];
    let mut incoming_fixed = vec![false; n];
    let mut path = vec![start];
    let mut cadence = Cadence::new(deadline, DEADLINE_CADENCE);

    dfs(
        &w,
        n,
        start,
        &neighbor_order,
        &min_out,
        &min_in,
        opts.bound_algo,
        one_tree_root_bound,
        &mut visited,
        &mut outgoing_fixed,
        &mut incoming_fixed,
        &mut path,
        0.0,
        &mut best_cost,
        &mut best_tour,
        &mut cadence,
        opts.eps,
    )?;

    if best_tour.is_empty() {
        return Err(TspError::IncompleteGraph);
    }

    let mut tour = best_tour;
    canonicalize_orientation(&mut tour);
    validate(&tour, n, start)?;
    let cost = tour_cost(dist, &tour)?;
    Ok((tour, cost))
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    w: &[f64],
    n: usize,
    start: usize,
    neighbor_order: &[Vec<usize>],
    min_out: &[f64],
    min_in: &[f64],
    bound_algo: BoundAlgo,
    one_tree_root_bound: Option<f64>,
    visited: &mut [bool],
    outgoing_fixed: &mut [bool],
    incoming_fixed: &mut [bool],
    path: &mut Vec<usize>,
    cost_so_far: f64,
    best_cost: &mut f64,
    best_tour: &mut Tour,
    cadence: &mut Cadence,
    eps: f64,
) -> Result<(), TspError> {
    if cadence.tick_elapsed() {
        return Err(TspError::TimeLimit);
    }

    let depth = path.len();
    if depth == n {
        let last = path[depth - 1];
        let closing = w[last * n + start];
        if closing.is_finite() {
            let total = stabilize(cost_so_far + closing);
            if total < *best_cost {
                *best_cost = total;
                let mut tour = path.clone();
                tour.push(start);
                *best_tour = tour;
            }
        }
        return Ok(());
    }

    let lb = match bound_algo {
        BoundAlgo::NoBound => cost_so_far,
        BoundAlgo::SimpleBound => simple_bound(cost_so_far, min_out, min_in, outgoing_fixed, incoming_fixed),
        BoundAlgo::OneTreeBound => one_tree_root_bound.unwrap_or(cost_so_far).max(cost_so_far),
    };
    if lb >= *best_cost - eps {
        return Ok(());
    }

    let current = path[depth - 1];
    for &next in &neighbor_order[current] {
        if visited[next] {
            continue;
        }
        let step = w[current * n + next];
        if !step.is_finite() {
            continue;
        }
        visited[next] = true;
        outgoing_fixed[current] = true;
        incoming_fixed[next] = true;
        path.push(next);

        dfs(
            w,
            n,
            start,
            neighbor_order,
            min_out,
            min_in,
            bound_algo,
            one_tree_root_bound,
            visited,
            outgoing_fixed,
            incoming_fixed,
            path,
            cost_so_far + step,
            best_cost,
            best_tour,
            cadence,
            eps,
        )?;

        path.pop();
        incoming_fixed[next] = false;
        outgoing_fixed[current] = false;
        visited[next] = false;
    }

    Ok(())
}

/// Seed an initial upper bound with a cheap heuristic: Christofides +
/// 2-opt for symmetric instances, a canonical ring + 2-opt* for
/// asymmetric ones. Falls back to the canonical ring alone if the
/// heuristic errors out (e.g. a matching failure can't happen with
/// greedy matching, but this keeps the seed robust against future
/// heuristic swaps).
fn seed_upper_bound(dist: &Matrix, opts: &Options) -> Result<(Tour, f64), TspError> {
    let n = dist.rows();
    let start = opts.start_vertex;

    if opts.symmetric {
        if let Ok((mut tour, _)) = christofides(dist, start, MatchingAlgo::Greedy) {
            let _ = two_opt(
                dist,
                &mut tour,
                true,
                ImprovementPolicy::Best,
                false,
                0,
                1e-9,
                opts.seed,
                Deadline::none(),
            );
            let cost = tour_cost(dist, &tour)?;
            return Ok((tour, cost));
        }
    }

    let mut tour = canonical_ring(n, start);
    let _ = two_opt(
        dist,
        &mut tour,
        opts.symmetric,
        ImprovementPolicy::Best,
        false,
        0,
        1e-9,
        opts.seed,
        Deadline::none(),
    );
    let cost = tour_cost(dist, &tour).unwrap_or(f64::INFINITY);
    Ok((tour, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symmetric_triangle() -> Matrix {
        let mut m = Matrix::new(3);
        for i in 0..3 {
            m.set(i, i, 0.0).unwrap();
        }
        let w = [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)];
        for &(i, j, d) in &w {
            m.set(i, j, d).unwrap();
            m.set(j, i, d).unwrap();
        }
        m
    }

    #[test]
    fn triangle_optimal_is_found() {
        let m = symmetric_triangle();
        let opts = Options::default().with_bound_algo(BoundAlgo::SimpleBound);
        let (tour, cost) = branch_and_bound(&m, &opts).unwrap();
        assert_eq!(cost, 6.0);
        assert_eq!(tour.first(), Some(&0));
    }

    #[test]
    fn no_bound_still_finds_optimum() {
        let m = symmetric_triangle();
        let opts = Options::default().with_bound_algo(BoundAlgo::NoBound);
        let (_, cost) = branch_and_bound(&m, &opts).unwrap();
        assert_eq!(cost, 6.0);
    }

    #[test]
    fn disconnected_instance_is_incomplete() {
        let m = Matrix::new(3);
        let opts = Options::default();
        assert_eq!(branch_and_bound(&m, &opts), Err(TspError::IncompleteGraph));
    }

    #[test]
    fn one_tree_bound_agrees_with_simple_bound_on_triangle() {
        let m = symmetric_triangle();
        let opts = Options::default().with_bound_algo(BoundAlgo::OneTreeBound);
        let (_, cost) = branch_and_bound(&m, &opts).unwrap();
        assert_eq!(cost, 6.0);
    }
}
