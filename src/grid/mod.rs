//! 2D-grid analyzer: connected components and minimum-conversion
//! island expansion over a rectangular integer grid, built on the same
//! [`crate::collab::Graph`] collaborator the TSP and flow modules borrow.

pub mod components;
pub mod expand;

use crate::collab::Graph;
use crate::error::GridError;

pub use components::{connected_components, Component};
pub use expand::expand_island;

/// 4- or 8-neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

impl Connectivity {
    /// `(dx, dy)` offsets for this connectivity, in a fixed deterministic
    /// order (cardinal directions first, diagonals last) so neighbor scans
    /// never depend on hash iteration order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (0, -1), (-1, 0), (1, 0), (0, 1),
            (-1, -1), (1, -1), (-1, 1), (1, 1),
        ];
        match self {
            Self::Four => &FOUR,
            Self::Eight => &EIGHT,
        }
    }
}

/// Grid analyzer configuration.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// A cell is land when its value is `>= threshold`.
    pub threshold: i64,
    pub connectivity: Connectivity,
}

impl Default for Options {
    fn default() -> Self {
        Self { threshold: 1, connectivity: Connectivity::Four }
    }
}

impl Options {
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// A rectangular integer grid over `width * height` cells, row-major.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<i64>,
    opts: Options,
}

impl Grid {
    /// Build a grid from ragged-checked rows.
    ///
    /// # Errors
    /// [`GridError::EmptyGrid`] if `rows` is empty or its first row is
    /// empty; [`GridError::NonRectangular`] if rows differ in length.
    pub fn new(rows: Vec<Vec<i64>>, opts: Options) -> Result<Self, GridError> {
        let height = rows.len();
        if height == 0 || rows[0].is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let width = rows[0].len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(GridError::NonRectangular);
        }
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { width, height, cells, opts })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// `(x, y) -> row-major cell index`. Caller must check [`Self::in_bounds`].
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `row-major cell index -> (x, y)`, the inverse of [`Self::index`].
    pub fn coordinate(&self, i: usize) -> (usize, usize) {
        (i % self.width, i / self.width)
    }

    pub fn value_at(&self, x: usize, y: usize) -> i64 {
        self.cells[self.index(x, y)]
    }

    pub fn is_land(&self, x: usize, y: usize) -> bool {
        self.value_at(x, y) >= self.opts.threshold
    }

    /// Neighbor cell coordinates under this grid's connectivity, in bounds.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.opts.connectivity.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            self.in_bounds(nx, ny).then_some((nx as usize, ny as usize))
        })
    }

    /// Build a weighted undirected [`Graph`] with one vertex per cell, id
    /// `"x,y"`, and a unit-weight edge between every pair of neighboring
    /// cells under this grid's connectivity (edges listed once; the
    /// collaborator's undirected flag mirrors them both ways).
    ///
    /// Vertex identity carries only `{x,y}`: `Graph` is shared with the TSP
    /// and flow modules and has no per-vertex metadata slot, and is not
    /// getting one just for this caller. Cell value is recovered with
    /// [`Self::value_at`] after parsing the `"x,y"` id back to coordinates.
    pub fn to_core_graph(&self) -> Graph {
        let mut g = Graph::new(false, true, false, false);
        for y in 0..self.height {
            for x in 0..self.width {
                g.add_vertex(vertex_id(x, y));
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                for (nx, ny) in self.neighbors(x, y) {
                    if (ny, nx) < (y, x) {
                        continue;
                    }
                    g.add_edge(&vertex_id(x, y), &vertex_id(nx, ny), 1);
                }
            }
        }
        g
    }
}

/// The canonical `"x,y"` vertex id [`Grid::to_core_graph`] uses.
pub fn vertex_id(x: usize, y: usize) -> String {
    format!("{x},{y}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::new(
            vec![vec![1, 1, 0], vec![0, 1, 0], vec![0, 0, 1]],
            Options::default(),
        )
        .unwrap()
    }

    #[test]
    fn empty_rows_rejected() {
        assert_eq!(Grid::new(vec![], Options::default()).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(Grid::new(vec![vec![]], Options::default()).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![vec![1, 1], vec![1]];
        assert_eq!(Grid::new(rows, Options::default()).unwrap_err(), GridError::NonRectangular);
    }

    #[test]
    fn index_and_coordinate_are_inverses() {
        let g = sample();
        for y in 0..g.height() {
            for x in 0..g.width() {
                assert_eq!(g.coordinate(g.index(x, y)), (x, y));
            }
        }
    }

    #[test]
    fn to_core_graph_has_one_vertex_per_cell_and_unit_edges() {
        let g = sample();
        let core = g.to_core_graph();
        assert_eq!(core.len(), 9);
        assert!(core.has_edge("0,0", "1,0"));
        assert!(core.has_edge("1,0", "0,0"));
        for (_, _, w) in core.edges() {
            assert_eq!(w, 1);
        }
    }

    #[test]
    fn eight_connectivity_adds_diagonal_neighbors() {
        let g4 = sample();
        let g8 = Grid::new(
            vec![vec![1, 1, 0], vec![0, 1, 0], vec![0, 0, 1]],
            Options::default().with_connectivity(Connectivity::Eight),
        )
        .unwrap();
        assert!(g8.to_core_graph().edges().count() > g4.to_core_graph().edges().count());
    }
}
