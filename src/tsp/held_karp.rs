//! Exact Held–Karp dynamic program, applicable to both TSP and
//! ATSP. `O(n^2 * 2^n)` time, `O(n * 2^n)` memory; a soft size guard caps
//! `n` at [`MAX_N`].

use crate::collab::Matrix;
use crate::deadline::{Cadence, Deadline};
use crate::error::TspError;

use super::cost::stabilize;
use super::tour::Tour;

/// Soft cap on instance size for the exact DP (time/memory).
pub const MAX_N: usize = 16;

/// Checked every 1024 inner transitions.
const DEADLINE_CADENCE: u64 = 1024;

/// Run Held–Karp from `start`, returning the optimal closed tour and its
/// stabilized cost.
///
/// # Errors
/// [`TspError::SizeTooLarge`] if `n > MAX_N`; any strict weight-sentinel
/// error surfaced while prefetching the dense weight buffer;
/// [`TspError::TimeLimit`] if `deadline` elapses;
/// [`TspError::IncompleteGraph`] if no Hamiltonian cycle exists.
pub fn held_karp(dist: &Matrix, start: usize, deadline: Deadline) -> Result<(Tour, f64), TspError> {
    let n = dist.rows();
    if n > MAX_N {
        return Err(TspError::SizeTooLarge);
    }

    let mut w = vec![0.0_f64; n * n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let v = dist.at(i, j).expect("in-bounds");
            if v.is_nan() {
                return Err(TspError::DimensionMismatch);
            }
            if v < 0.0 {
                return Err(TspError::NegativeWeight);
            }
            w[i * n + j] = v; // may be +inf, meaning "no edge"
        }
    }

    if n == 1 {
        return Ok((vec![start, start], 0.0));
    }

    let full_mask = 1usize << n;
    let mut dp = vec![f64::INFINITY; full_mask * n];
    let mut parent = vec![usize::MAX; full_mask * n];
    dp[(1 << start) * n + start] = 0.0;

    let mut cadence = Cadence::new(deadline, DEADLINE_CADENCE);

    for mask in 0..full_mask {
        if mask.count_ones() < 2 || (mask & (1 << start)) == 0 {
            continue;
        }
        for j in 0..n {
            if mask & (1 << j) == 0 {
                continue;
            }
            let cur = dp[mask * n + j];
            if !cur.is_finite() {
                continue;
            }
            for k in 0..n {
                if k == j || mask & (1 << k) != 0 {
                    continue;
                }
                if cadence.tick_elapsed() {
                    return Err(TspError::TimeLimit);
                }
                let wjk = w[j * n + k];
                if !wjk.is_finite() {
                    continue;
                }
                let next_mask = mask | (1 << k);
                let candidate = cur + wjk;
                if candidate < dp[next_mask * n + k] {
                    dp[next_mask * n + k] = candidate;
                    parent[next_mask * n + k] = j;
                }
            }
        }
    }

    let full = full_mask - 1;
    let mut best_j = None;
    let mut best_cost = f64::INFINITY;
    for j in 0..n {
        if j == start {
            continue;
        }
        let base = dp[full * n + j];
        if !base.is_finite() {
            continue;
        }
        let close = w[j * n + start];
        if !close.is_finite() {
            continue;
        }
        let total = base + close;
        if total < best_cost {
            best_cost = total;
            best_j = Some(j);
        }
    }

    let Some(mut j) = best_j else {
        return Err(TspError::IncompleteGraph);
    };

    let mut mask = full;
    let mut rev_path = vec![j];
    while j != start {
        let pj = parent[mask * n + j];
        mask &= !(1 << j);
        j = pj;
        rev_path.push(j);
    }
    rev_path.reverse();
    rev_path.push(start);

    Ok((rev_path, stabilize(best_cost)))
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
    fn triangle_optimal_cost_is_six() {
        let m = symmetric_triangle();
        let (tour, cost) = held_karp(&m, 0, Deadline::none()).unwrap();
        assert_eq!(cost, 6.0);
        assert_eq!(tour.first(), Some(&0));
        assert_eq!(tour.last(), Some(&0));
    }

    #[test]
    fn too_large_instance_is_rejected() {
        let m = Matrix::new(MAX_N + 1);
        assert_eq!(held_karp(&m, 0, Deadline::none()), Err(TspError::SizeTooLarge));
    }

    #[test]
    fn disconnected_instance_is_incomplete() {
        let m = Matrix::new(3);
        assert_eq!(held_karp(&m, 0, Deadline::none()), Err(TspError::IncompleteGraph));
    }
}
