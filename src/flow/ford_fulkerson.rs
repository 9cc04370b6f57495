//! Ford–Fulkerson: repeated DFS augmenting paths. No shortest-path
//! guarantee, so no polynomial iteration bound on irrational or
//! ill-chosen capacities; kept for comparison against the BFS-based
//! [`super::edmonds_karp`] and level-graph [`super::dinic`] engines.

use fixedbitset::FixedBitSet;

use crate::collab::Graph;
use crate::deadline::{Cadence, Deadline};
use crate::error::FlowError;

use super::options::Options;
use super::residual::{build_residual, materialize, Residual};

const DEADLINE_CADENCE: u64 = 2048;

/// Run Ford–Fulkerson from `source` to `sink`, returning the maximum flow
/// value and the residual graph (remaining capacities) as a [`Graph`].
///
/// # Errors
/// [`FlowError::SourceNotFound`] / [`FlowError::SinkNotFound`] if either
/// vertex id is absent; [`FlowError::EdgeError`] for a rejected negative
/// capacity; [`FlowError::Cancelled`] if the time budget elapses.
pub fn ford_fulkerson(g: &Graph, source: &str, sink: &str, opts: &Options) -> Result<(f64, Graph), FlowError> {
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
        let Some((path, bottleneck)) = find_path(&residual, s, t, opts.eps) else {
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

/// DFS for any source-to-sink path with strictly positive residual
/// capacity along every arc; returns the path and its bottleneck.
fn find_path(residual: &Residual, s: usize, t: usize, eps: f64) -> Option<(Vec<usize>, f64)> {
    let n = residual.n();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut parent = vec![usize::MAX; n];
    let mut stack = vec![s];
    visited.insert(s);

    while let Some(u) = stack.pop() {
        if u == t {
            break;
        }
        for &v in residual.neighbors(u) {
            if visited.contains(v) || residual.capacity(u, v) <= eps {
                continue;
            }
            visited.insert(v);
            parent[v] = u;
            stack.push(v);
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
