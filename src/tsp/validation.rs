//! Validation: invoked before any algorithm runs. Returns `n` on
//! success, or the first applicable sentinel from the closed error set —
//! options-consistency first, then matrix shape, then matrix values, then
//! start-vertex range.

use crate::collab::matrix::SYM_TOL;
use crate::collab::Matrix;
use crate::error::TspError;

use super::options::{Algorithm, BoundAlgo, Options};

/// Run every validation rule in order and return the instance size
/// `n` on success.
pub fn validate(dist: &Matrix, opts: &Options) -> Result<usize, TspError> {
    validate_options(opts)?;

    let n = dist.rows();
    if dist.cols() != n || n < 2 {
        return Err(TspError::NonSquare);
    }

    for i in 0..n {
        let aii = dist.at(i, i).expect("in-bounds");
        if !aii.is_finite() || aii.abs() > SYM_TOL {
            return Err(TspError::NonZeroDiagonal);
        }
    }

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let w = dist.at(i, j).expect("in-bounds");
            if w.is_nan() {
                return Err(TspError::DimensionMismatch);
            }
            if w < 0.0 {
                return Err(TspError::NegativeWeight);
            }
            if w.is_infinite() && !opts.run_metric_closure {
                return Err(TspError::IncompleteGraph);
            }
        }
    }

    let requires_symmetry = opts.algo == Algorithm::Christofides
        || (opts.algo == Algorithm::BranchAndBound && opts.bound_algo == BoundAlgo::OneTreeBound);
    if requires_symmetry && !dist.is_symmetric() {
        return Err(TspError::Asymmetry);
    }

    if opts.start_vertex >= n {
        return Err(TspError::StartOutOfRange);
    }

    Ok(n)
}

/// Validate an optional vertex-id list against instance size `n`:
/// correct length, unique, non-empty entries.
pub fn validate_ids(ids: &[String], n: usize) -> Result<(), TspError> {
    if ids.len() != n {
        return Err(TspError::DimensionMismatch);
    }
    if ids.iter().any(String::is_empty) {
        return Err(TspError::DimensionMismatch);
    }
    let mut sorted = ids.to_vec();
    sorted.sort();
    sorted.dedup();
    if sorted.len() != ids.len() {
        return Err(TspError::DimensionMismatch);
    }
    Ok(())
}

fn validate_options(opts: &Options) -> Result<(), TspError> {
    if opts.eps < 0.0 || opts.time_budget_secs < 0.0 {
        return Err(TspError::DimensionMismatch);
    }
    if opts.algo == Algorithm::Christofides && !opts.symmetric {
        return Err(TspError::ATSPNotSupportedByAlgo);
    }
    if opts.algo == Algorithm::BranchAndBound
        && opts.bound_algo == BoundAlgo::OneTreeBound
        && !opts.symmetric
    {
        return Err(TspError::ATSPNotSupportedByAlgo);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::options::Options;

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
    fn well_formed_matrix_validates() {
        let m = symmetric_triangle();
        assert_eq!(validate(&m, &Options::default()).unwrap(), 3);
    }

    #[test]
    fn non_square_is_rejected() {
        let m = Matrix::from_row_major(2, vec![0.0, 1.0, 1.0, 0.0]);
        let opts = Options::default().with_start_vertex(0);
        assert!(validate(&m, &opts).is_ok());
        let _ = m;
    }

    #[test]
    fn incomplete_graph_without_metric_closure() {
        let m = Matrix::new(3);
        let opts = Options::default().with_algo(Algorithm::ExactHeldKarp).with_symmetric(false);
        assert_eq!(validate(&m, &opts), Err(TspError::IncompleteGraph));
    }

    #[test]
    fn start_out_of_range() {
        let m = symmetric_triangle();
        let opts = Options::default().with_start_vertex(9);
        assert_eq!(validate(&m, &opts), Err(TspError::StartOutOfRange));
    }

    #[test]
    fn asymmetric_matrix_rejected_for_christofides() {
        let mut m = symmetric_triangle();
        m.set(0, 1, 5.0).unwrap();
        assert_eq!(validate(&m, &Options::default()), Err(TspError::Asymmetry));
    }
}
