//! Island expansion (§4.15): the minimum number of water-cell conversions
//! needed to connect a `src` cell set to a `dst` cell set, found with a
//! 0-1 BFS — a deque walk where land neighbors push to the front (weight
//! 0) and water neighbors push to the back (weight 1), the same
//! front/back split [`super::components`]'s plain BFS has no need for.

use std::collections::VecDeque;

use super::Grid;
use crate::error::GridError;

/// Find a minimum-conversion path from any `src` cell to any `dst` cell.
/// Returns the number of water cells that must turn to land and the path
/// (inclusive of both endpoints) that achieves it.
///
/// # Errors
/// [`GridError::ComponentIndex`] if `src` or `dst` is empty or names a
/// cell outside the grid; [`GridError::NoPath`] if no cell in `dst` is
/// reachable from any cell in `src`.
pub fn expand_island(
    grid: &Grid,
    src: &[(usize, usize)],
    dst: &[(usize, usize)],
) -> Result<(usize, Vec<(usize, usize)>), GridError> {
    if src.is_empty() || dst.is_empty() {
        return Err(GridError::ComponentIndex);
    }
    for &(x, y) in src.iter().chain(dst.iter()) {
        if !grid.in_bounds(x as i32, y as i32) {
            return Err(GridError::ComponentIndex);
        }
    }

    let n = grid.width() * grid.height();
    let mut dist = vec![usize::MAX; n];
    let mut parent = vec![usize::MAX; n];
    let mut deque: VecDeque<usize> = VecDeque::with_capacity(n + 1);

    for &(x, y) in src {
        let idx = grid.index(x, y);
        if dist[idx] == usize::MAX {
            dist[idx] = 0;
            deque.push_back(idx);
        }
    }

    let is_dst = |idx: usize| {
        let (x, y) = grid.coordinate(idx);
        dst.contains(&(x, y))
    };

    let mut reached = None;
    while let Some(u) = deque.pop_front() {
        if is_dst(u) {
            reached = Some(u);
            break;
        }
        let (ux, uy) = grid.coordinate(u);
        for (nx, ny) in grid.neighbors(ux, uy) {
            let v = grid.index(nx, ny);
            let weight = if grid.is_land(nx, ny) { 0 } else { 1 };
            let nd = dist[u].saturating_add(weight);
            if nd < dist[v] {
                dist[v] = nd;
                parent[v] = u;
                if weight == 0 {
                    deque.push_front(v);
                } else {
                    deque.push_back(v);
                }
            }
        }
    }

    let Some(end) = reached else {
        return Err(GridError::NoPath);
    };

    let mut path = vec![grid.coordinate(end)];
    let mut cur = end;
    while dist[cur] != 0 {
        cur = parent[cur];
        path.push(grid.coordinate(cur));
    }
    path.reverse();

    Ok((dist[end], path))
}

#[cfg(test)]
mod tests {
    use super::super::Options;
    use super::*;

    #[test]
    fn two_islands_with_a_water_bridge() {
        // 4x3 grid, two one-cell islands separated by two water cells.
        let rows = vec![
            vec![1, 0, 0, 1],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ];
        let grid = Grid::new(rows, Options::default()).unwrap();
        let (conversions, path) = expand_island(&grid, &[(0, 0)], &[(3, 0)]).unwrap();
        assert_eq!(conversions, 2);
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(3, 0)));
    }

    #[test]
    fn adjacent_land_cells_cost_zero_conversions() {
        let rows = vec![vec![1, 1]];
        let grid = Grid::new(rows, Options::default()).unwrap();
        let (conversions, _) = expand_island(&grid, &[(0, 0)], &[(1, 0)]).unwrap();
        assert_eq!(conversions, 0);
    }

    #[test]
    fn empty_src_is_rejected() {
        let rows = vec![vec![1, 1]];
        let grid = Grid::new(rows, Options::default()).unwrap();
        assert_eq!(
            expand_island(&grid, &[], &[(1, 0)]).unwrap_err(),
            GridError::ComponentIndex
        );
    }

    #[test]
    fn out_of_bounds_cell_is_rejected() {
        let rows = vec![vec![1, 1]];
        let grid = Grid::new(rows, Options::default()).unwrap();
        assert_eq!(
            expand_island(&grid, &[(5, 5)], &[(1, 0)]).unwrap_err(),
            GridError::ComponentIndex
        );
    }

    #[test]
    fn src_cell_already_in_dst_needs_no_conversions() {
        let rows = vec![vec![1]];
        let grid = Grid::new(rows, Options::default()).unwrap();
        let (conversions, path) = expand_island(&grid, &[(0, 0)], &[(0, 0)]).unwrap();
        assert_eq!(conversions, 0);
        assert_eq!(path, vec![(0, 0)]);
    }
}
