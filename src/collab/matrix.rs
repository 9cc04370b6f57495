//! The distance-matrix collaborator: a dense, bounds-checked `n x n` grid
//! of finite-or-±∞ weights.
//!
//! `+inf` means "no direct edge"; `At`/`Set` return [`IndexOutOfBounds`], a
//! sentinel distinct from every TSP/flow/grid sentinel, since an
//! out-of-range matrix access is a collaborator-contract violation rather
//! than an algorithmic outcome.

use core::fmt;

/// Tolerance used to decide symmetry and near-zero diagonals.
pub const SYM_TOL: f64 = 1e-12;

/// Returned by [`Matrix::at`] / [`Matrix::set`] on an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl fmt::Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            self.row, self.col, self.rows, self.cols
        )
    }
}

impl std::error::Error for IndexOutOfBounds {}

/// A dense, square distance matrix of `f64` (possibly `+inf`/`-inf`).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// A new `n x n` matrix filled with `+inf` ("no direct edge").
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![f64::INFINITY; n * n],
        }
    }

    /// Build a matrix from a row-major `n*n` buffer.
    pub fn from_row_major(n: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), n * n, "row-major buffer does not match n*n");
        Self { n, data }
    }

    pub fn rows(&self) -> usize {
        self.n
    }

    pub fn cols(&self) -> usize {
        self.n
    }

    pub fn at(&self, i: usize, j: usize) -> Result<f64, IndexOutOfBounds> {
        self.check(i, j)?;
        Ok(self.data[i * self.n + j])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), IndexOutOfBounds> {
        self.check(i, j)?;
        self.data[i * self.n + j] = value;
        Ok(())
    }

    fn check(&self, i: usize, j: usize) -> Result<(), IndexOutOfBounds> {
        if i < self.n && j < self.n {
            Ok(())
        } else {
            Err(IndexOutOfBounds { row: i, col: j, rows: self.n, cols: self.n })
        }
    }

    /// `true` when `|a_ij - a_ji| <= SYM_TOL` for every `i != j`.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let a = self.data[i * self.n + j];
                let b = self.data[j * self.n + i];
                if (a - b).abs() > SYM_TOL && !(a.is_infinite() && b.is_infinite() && a.signum() == b.signum()) {
                    return false;
                }
            }
        }
        true
    }

    /// Flat row-major view, for algorithms that want to index directly.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Flags the adjacency-matrix builder accepts as overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixBuilderFlags {
    /// When set, `+inf` entries are replaced by all-pairs shortest paths.
    pub run_metric_closure: bool,
}

impl Default for MatrixBuilderFlags {
    fn default() -> Self {
        Self { run_metric_closure: false }
    }
}

/// Build a dense adjacency matrix from a [`super::Graph`], respecting its
/// directed/weighted/loop/multi flags, optionally applying the metric
/// closure (all-pairs shortest paths) to densify missing edges.
///
/// Returns the matrix together with the vertex-id ordering that indexes it
/// (position `i` in the returned `Vec<String>` is row/column `i`).
pub fn adjacency_matrix_from_graph(
    g: &super::Graph,
    flags: MatrixBuilderFlags,
) -> (Matrix, Vec<String>) {
    let n = g.len();
    let ids: Vec<String> = g.vertices().map(str::to_owned).collect();
    let mut m = Matrix::new(n);
    for i in 0..n {
        let _ = m.set(i, i, 0.0);
    }
    for (from, to, weight) in g.edges() {
        let w = if g.is_weighted() { weight as f64 } else { 1.0 };
        let current = m.at(from, to).unwrap();
        let candidate = if current.is_finite() { current.min(w) } else { w };
        let _ = m.set(from, to, candidate);
        if !g.is_directed() {
            let _ = m.set(to, from, candidate);
        }
    }
    if flags.run_metric_closure {
        floyd_warshall_closure(&mut m);
    }
    (m, ids)
}

/// All-pairs shortest paths, used to densify a matrix when metric closure
/// is requested. `O(n^3)`; lives here because the matrix builder needs it
/// to honor `RunMetricClosure`.
fn floyd_warshall_closure(m: &mut Matrix) {
    let n = m.rows();
    for k in 0..n {
        for i in 0..n {
            let dik = m.at(i, k).unwrap();
            if !dik.is_finite() {
                continue;
            }
            for j in 0..n {
                let dkj = m.at(k, j).unwrap();
                if !dkj.is_finite() {
                    continue;
                }
                let through = dik + dkj;
                let direct = m.at(i, j).unwrap();
                if through < direct {
                    let _ = m.set(i, j, through);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::Graph;

    #[test]
    fn bounds_checked_access() {
        let m = Matrix::new(3);
        assert!(m.at(2, 2).is_ok());
        assert!(m.at(3, 0).is_err());
    }

    #[test]
    fn symmetry_detection() {
        let mut m = Matrix::new(2);
        m.set(0, 1, 1.0).unwrap();
        m.set(1, 0, 1.0).unwrap();
        assert!(m.is_symmetric());
        m.set(1, 0, 2.0).unwrap();
        assert!(!m.is_symmetric());
    }

    #[test]
    fn metric_closure_densifies() {
        let mut g = Graph::new(false, true, false, false);
        g.add_edge("a", "b", 1);
        g.add_edge("b", "c", 1);
        let (m, ids) = adjacency_matrix_from_graph(&g, MatrixBuilderFlags { run_metric_closure: true });
        let a = ids.iter().position(|x| x == "a").unwrap();
        let c = ids.iter().position(|x| x == "c").unwrap();
        assert_eq!(m.at(a, c).unwrap(), 2.0);
    }
}
