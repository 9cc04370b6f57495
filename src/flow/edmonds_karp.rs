//! Edmonds–Karp: Ford–Fulkerson restricted to BFS shortest
//! augmenting paths, which bounds the number of augmentations to
//! `O(|V| |E|)` regardless of capacity values.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::collab::Graph;
use crate::deadline::{Cadence, Deadline};
use crate::error::FlowError;

use super::options::Options;
use super::residual::{build_residual, materialize, Residual};

const DEADLINE_CADENCE: u64 = 2048;

/// Run Edmonds–Karp from `source` to `sink`, returning the maximum flow
/// value and the residual graph (remaining capacities) as a [`Graph`].
///
/// # Errors
/// Same as [`super::ford_fulkerson::ford_fulkerson`].
pub fn edmonds_karp(g: &Graph, source: &str, sink: &str, opts: &Options) -> Result<(f64, Graph), FlowError> {
    let s = g.vertex_index(source).ok_or(FlowError::SourceNotFound)?;
    let t = g.vertex_index(sink).ok_or(FlowError::SinkNotFound)?;
    let mut residual = build_residual(g, opts.eps)?;
    let deadline = Deadline::from_budget_secs(opts.time_budget_secs);
    let mut cadence = Cadence::new(deadline, DEADLINE_CADENCE);

    let mut max_flow = 0.0;
    loop {
        if cadence.tick_elapsed() {
            return Err(FlowError::Cancelled);
        }
        let Some((path, bottleneck)) = shortest_path(&residual, s, t, opts.eps) else {
            break;
        };
        for window in path.windows(2) {
            residual.push(window[0], window[1], bottleneck);
        }
        max_flow += bottleneck;
        if opts.verbose {
            eprintln!("path {path:?} flow {bottleneck}");
        }
    }

    Ok((max_flow, materialize(g, &residual, opts.eps)))
}

/// BFS for the shortest (fewest-arcs) source-to-sink path with strictly
/// positive residual capacity; returns the path and its bottleneck.
fn shortest_path(residual: &Residual, s: usize, t: usize, eps: f64) -> Option<(Vec<usize>, f64)> {
    let n = residual.n();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut parent = vec![usize::MAX; n];
    let mut queue = VecDeque::new();
    visited.insert(s);
    queue.push_back(s);

    while let Some(u) = queue.pop_front() {
        if u == t {
            break;
        }
        for &v in residual.neighbors(u) {
            if visited.contains(v) || residual.capacity(u, v) <= eps {
                continue;
            }
            visited.insert(v);
            parent[v] = u;
            queue.push_back(v);
        }
    }

    if !visited.contains(t) {
        return None;
    }

    let mut path = vec![t];
    let mut cur = t;
    while cur != s {
        cur = parent[cur];
        path.push(cur);
    }
    path.reverse();

    let bottleneck = path
        .windows(2)
        .map(|w| residual.capacity(w[0], w[1]))
        .fold(f64::INFINITY, f64::min);

    Some((path, bottleneck))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_flow_is_twenty_three() {
        let mut g = Graph::new(true, true, false, false);
        let edges = [
            ("s", "a", 16), ("s", "b", 13),
            ("a", "b", 10), ("a", "c", 12),
            ("b", "a", 4), ("b", "d", 14),
            ("c", "b", 9), ("c", "t", 20),
            ("d", "c", 7), ("d", "t", 4),
        ];
        for (u, v, w) in edges {
            g.add_edge(u, v, w);
        }
        let (max_flow, _) = edmonds_karp(&g, "s", "t", &Options::default()).unwrap();
        assert_eq!(max_flow, 23.0);
    }

    #[test]
    fn doubled_unit_chain_is_two() {
        // Two parallel chains of unit-capacity edges, source to sink.
        let mut g = Graph::new(true, true, false, true);
        g.add_edge("s", "m1", 1);
        g.add_edge("m1", "t", 1);
        g.add_edge("s", "m2", 1);
        g.add_edge("m2", "t", 1);
        let (max_flow, _) = edmonds_karp(&g, "s", "t", &Options::default()).unwrap();
        assert_eq!(max_flow, 2.0);
    }

    #[test]
    fn no_path_gives_zero_flow() {
        let mut g = Graph::new(true, true, false, false);
        g.add_edge("s", "a", 5);
        g.add_vertex("t");
        let (max_flow, _) = edmonds_karp(&g, "s", "t", &Options::default()).unwrap();
        assert_eq!(max_flow, 0.0);
    }
}
