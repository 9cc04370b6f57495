//! Connected components: BFS from each unvisited land cell, where
//! a neighbor only joins the run if it carries the *same* value as the
//! seed cell — components are therefore grouped by value, not just by
//! land/water.

use std::collections::{HashMap, VecDeque};

use fixedbitset::FixedBitSet;

use super::Grid;

/// One connected run of same-valued land cells, as `(x, y, value)` in BFS
/// visiting order.
pub type Component = Vec<(usize, usize, i64)>;

/// Group every land cell (value `>= threshold`) into same-valued connected
/// components, keyed by value. Components for a given value are listed in
/// the order their seed cell was first reached scanning row-major.
pub fn connected_components(grid: &Grid) -> HashMap<i64, Vec<Component>> {
    let mut visited = FixedBitSet::with_capacity(grid.width() * grid.height());
    let mut out: HashMap<i64, Vec<Component>> = HashMap::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let idx = grid.index(x, y);
            if visited.contains(idx) || !grid.is_land(x, y) {
                continue;
            }
            let value = grid.value_at(x, y);
            let component = bfs_same_value(grid, &mut visited, x, y, value);
            out.entry(value).or_default().push(component);
        }
    }

    out
}

fn bfs_same_value(
    grid: &Grid,
    visited: &mut FixedBitSet,
    sx: usize,
    sy: usize,
    value: i64,
) -> Component {
    let mut component = Vec::new();
    let mut queue = VecDeque::new();
    visited.insert(grid.index(sx, sy));
    queue.push_back((sx, sy));

    while let Some((x, y)) = queue.pop_front() {
        component.push((x, y, value));
        for (nx, ny) in grid.neighbors(x, y) {
            let nidx = grid.index(nx, ny);
            if visited.contains(nidx) || grid.value_at(nx, ny) != value {
                continue;
            }
            visited.insert(nidx);
            queue.push_back((nx, ny));
        }
    }

    component
}

#[cfg(test)]
mod tests {
    use super::super::{Connectivity, Options};
    use super::*;

    #[test]
    fn two_islands_of_the_same_value_are_separate_components() {
        let rows = vec![
            vec![1, 1, 0, 1, 1],
            vec![0, 0, 0, 1, 1],
            vec![0, 0, 0, 0, 0],
        ];
        let grid = Grid::new(rows, Options::default()).unwrap();
        let comps = connected_components(&grid);
        assert_eq!(comps.get(&1).unwrap().len(), 2);
    }

    #[test]
    fn different_values_never_join_the_same_component() {
        let rows = vec![vec![1, 2]];
        let grid = Grid::new(rows, Options::default().with_threshold(1)).unwrap();
        let comps = connected_components(&grid);
        assert_eq!(comps.get(&1).unwrap().len(), 1);
        assert_eq!(comps.get(&2).unwrap().len(), 1);
    }

    #[test]
    fn diagonal_only_touch_is_not_connected_under_four_connectivity() {
        let rows = vec![vec![1, 0], vec![0, 1]];
        let grid = Grid::new(rows, Options::default()).unwrap();
        let comps = connected_components(&grid);
        assert_eq!(comps.get(&1).unwrap().len(), 2);
    }

    #[test]
    fn diagonal_touch_connects_under_eight_connectivity() {
        let rows = vec![vec![1, 0], vec![0, 1]];
        let grid = Grid::new(
            rows,
            Options::default().with_connectivity(Connectivity::Eight),
        )
        .unwrap();
        let comps = connected_components(&grid);
        assert_eq!(comps.get(&1).unwrap().len(), 1);
    }
}
