//! Branch-and-bound lower bounds: the degree-1 relaxation
//! ([`simple_bound`]) and the Held–Karp 1-tree Lagrangian dual
//! ([`one_tree_bound`]).

use crate::collab::Matrix;
use crate::deadline::{Cadence, Deadline};
use crate::error::TspError;

use super::cost::stabilize;

/// Per-vertex cheapest outgoing and incoming arc weight over `v != u`.
/// Returns [`TspError::IncompleteGraph`] if any vertex lacks a finite
/// outgoing or incoming edge — no completion could ever visit it.
pub fn min_out_in(dist: &Matrix) -> Result<(Vec<f64>, Vec<f64>), TspError> {
    let n = dist.rows();
    let mut min_out = vec![f64::INFINITY; n];
    let mut min_in = vec![f64::INFINITY; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let w = dist.at(i, j).expect("in-bounds");
            if w.is_finite() {
                min_out[i] = min_out[i].min(w);
                min_in[j] = min_in[j].min(w);
            }
        }
    }
    if min_out.iter().any(|w| !w.is_finite()) || min_in.iter().any(|w| !w.is_finite()) {
        return Err(TspError::IncompleteGraph);
    }
    Ok((min_out, min_in))
}

/// Degree-1 relaxation: every vertex needs one fixed-or-relaxed outgoing
/// and incoming arc; `LB = costSoFar + max(sum minOut_unfixed, sum
/// minIn_unfixed)`.
pub fn simple_bound(
    cost_so_far: f64,
    min_out: &[f64],
    min_in: &[f64],
    outgoing_fixed: &[bool],
    incoming_fixed: &[bool],
) -> f64 {
    let extra_out: f64 = min_out
        .iter()
        .zip(outgoing_fixed)
        .filter(|(_, &fixed)| !fixed)
        .map(|(&w, _)| w)
        .sum();
    let extra_in: f64 = min_in
        .iter()
        .zip(incoming_fixed)
        .filter(|(_, &fixed)| !fixed)
        .map(|(&w, _)| w)
        .sum();
    cost_so_far + extra_out.max(extra_in)
}

/// A computed minimum 1-tree: total reduced cost and per-vertex degree.
struct OneTree {
    reduced_cost: f64,
    degree: Vec<usize>,
}

/// Minimum 1-tree under reduced costs `c'(i,j) = c(i,j) + pi[i] + pi[j]`:
/// an MST on `V \ {root}` plus the two cheapest root-incident edges.
fn min_one_tree(dist: &Matrix, root: usize, pi: &[f64]) -> Option<OneTree> {
    let n = dist.rows();
    let reduced = |i: usize, j: usize| -> f64 {
        let w = dist.at(i, j).expect("in-bounds");
        if w.is_infinite() {
            w
        } else {
            w + pi[i] + pi[j]
        }
    };

    // Prim's MST over V \ {root}.
    let others: Vec<usize> = (0..n).filter(|&v| v != root).collect();
    if others.is_empty() {
        return None;
    }
    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent = vec![usize::MAX; n];
    key[others[0]] = 0.0;
    let mut degree = vec![0usize; n];
    let mut reduced_cost = 0.0;

    for _ in 0..others.len() {
        let mut best: Option<usize> = None;
        for &v in &others {
            if in_tree[v] {
                continue;
            }
            let better = match best {
                Some(b) => key[v] < key[b],
                None => true,
            };
            if better {
                best = Some(v);
            }
        }
        let u = best?;
        if key[u].is_infinite() {
            return None;
        }
        in_tree[u] = true;
        if parent[u] != usize::MAX {
            degree[u] += 1;
            degree[parent[u]] += 1;
            reduced_cost += key[u];
        }
        for &v in &others {
            if in_tree[v] {
                continue;
            }
            let w = reduced(u, v);
            if w.is_finite() && w < key[v] {
                key[v] = w;
                parent[v] = u;
            }
        }
    }

    // Two cheapest root-incident edges by reduced cost.
    let mut root_edges: Vec<(usize, f64)> = others
        .iter()
        .map(|&v| (v, reduced(root, v)))
        .filter(|(_, w)| w.is_finite())
        .collect();
    if root_edges.len() < 2 {
        return None;
    }
    root_edges.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.cmp(&b.0)));
    for &(v, w) in &root_edges[0..2] {
        reduced_cost += w;
        degree[v] += 1;
        degree[root] += 1;
    }

    Some(OneTree { reduced_cost, degree })
}

/// Held–Karp 1-tree Lagrangian dual at `root`, via subgradient ascent.
/// Symmetric instances only; intended for use at the branch-and-bound
/// root. `ub`, if finite, sharpens the step size; the search
/// terminates early on a zero subgradient (the 1-tree is already a tour).
pub fn one_tree_bound(
    dist: &Matrix,
    root: usize,
    ub: Option<f64>,
    deadline: Deadline,
) -> Result<f64, TspError> {
    const MAX_ITERS: usize = 32;
    const ALPHA: f64 = 0.9;
    const DEADLINE_CADENCE: u64 = 2048;

    let n = dist.rows();
    let mut pi = vec![0.0_f64; n];
    let mut best_l = f64::NEG_INFINITY;
    let mut cadence = Cadence::new(deadline, DEADLINE_CADENCE);

    for iter in 0..MAX_ITERS {
        if cadence.tick_elapsed() {
            return Err(TspError::TimeLimit);
        }
        let Some(tree) = min_one_tree(dist, root, &pi) else {
            return Err(TspError::IncompleteGraph);
        };
        let l = tree.reduced_cost - 2.0 * pi.iter().sum::<f64>();
        if l > best_l {
            best_l = l;
        }

        let subgradient: Vec<f64> = (0..n).map(|v| tree.degree[v] as f64 - 2.0).collect();
        let norm_sq: f64 = subgradient.iter().map(|s| s * s).sum();
        if norm_sq == 0.0 {
            break;
        }
        let t = match ub {
            Some(ub) if ub.is_finite() => ALPHA * (ub - l) / norm_sq,
            _ => ALPHA / (1.0 + iter as f64),
        };
        for v in 0..n {
            pi[v] += t * subgradient[v];
        }
    }

    Ok(stabilize(best_l))
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
    fn one_tree_bound_at_root_equals_six_on_triangle() {
        let m = symmetric_triangle();
        let lb = one_tree_bound(&m, 0, None, Deadline::none()).unwrap();
        assert_eq!(lb, 6.0);
    }

    #[test]
    fn one_tree_bound_dominates_degree_one_bound_at_zero_multipliers() {
        let m = symmetric_triangle();
        let (min_out, min_in) = min_out_in(&m).unwrap();
        let degree1 = simple_bound(0.0, &min_out, &min_in, &[false; 3], &[false; 3]);
        let lb = one_tree_bound(&m, 0, None, Deadline::none()).unwrap();
        assert!(lb >= degree1 - 1e-9);
    }

    #[test]
    fn min_out_in_flags_disconnected_vertex() {
        let m = Matrix::new(3);
        assert_eq!(min_out_in(&m), Err(TspError::IncompleteGraph));
    }
}
