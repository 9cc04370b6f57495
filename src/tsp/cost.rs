//! Cost accessors. Every per-arc read goes through [`edge_cost`] so
//! guard behavior (NaN / infinite / negative) is enforced exactly once,
//! and every final sum is [`stabilize`]d to remove cross-platform FP
//! drift before it is compared or returned.

use crate::collab::Matrix;
use crate::error::TspError;

/// `round(x * 1e9) / 1e9` — removes cross-platform floating-point drift
/// before a cost is compared or returned.
pub fn stabilize(x: f64) -> f64 {
    (x * 1e9).round() / 1e9
}

/// `O(1)` accessor for a single arc's weight, with the strict guards used
/// throughout the solvers: NaN is a dimension-mismatch (the matrix lied
/// about being well-formed), `+-inf` means no edge, and negative weights
/// are rejected outright.
pub fn edge_cost(dist: &Matrix, u: usize, v: usize) -> Result<f64, TspError> {
    let w = dist.at(u, v).map_err(|_| TspError::DimensionMismatch)?;
    if w.is_nan() {
        return Err(TspError::DimensionMismatch);
    }
    if w.is_infinite() {
        return Err(TspError::IncompleteGraph);
    }
    if w < 0.0 {
        return Err(TspError::NegativeWeight);
    }
    Ok(w)
}

/// Sum the `n` arcs `tour[i] -> tour[i+1]`, stabilized to `1e-9`.
pub fn tour_cost(dist: &Matrix, tour: &[usize]) -> Result<f64, TspError> {
    let mut total = 0.0;
    for window in tour.windows(2) {
        total += edge_cost(dist, window[0], window[1])?;
    }
    Ok(stabilize(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::Matrix;

    fn matrix3() -> Matrix {
        let mut m = Matrix::new(3);
        m.set(0, 1, 1.0).unwrap();
        m.set(1, 0, 1.0).unwrap();
        m.set(1, 2, 2.0).unwrap();
        m.set(2, 1, 2.0).unwrap();
        m.set(0, 2, 3.0).unwrap();
        m.set(2, 0, 3.0).unwrap();
        m
    }

    #[test]
    fn triangle_cost_is_six() {
        let m = matrix3();
        assert_eq!(tour_cost(&m, &[0, 1, 2, 0]).unwrap(), 6.0);
    }

    #[test]
    fn infinite_edge_is_incomplete_graph() {
        let m = Matrix::new(2);
        assert_eq!(edge_cost(&m, 0, 1), Err(TspError::IncompleteGraph));
    }

    #[test]
    fn negative_edge_is_rejected() {
        let mut m = Matrix::new(2);
        m.set(0, 1, -1.0).unwrap();
        assert_eq!(edge_cost(&m, 0, 1), Err(TspError::NegativeWeight));
    }

    #[test]
    fn stabilize_removes_drift() {
        let x = 0.1 + 0.2;
        assert_eq!(stabilize(x), 0.3);
    }
}
