//! Dinic's algorithm: successive level graphs (BFS) with a blocking flow
//! found by DFS within each, advancing a per-vertex neighbor pointer so
//! no edge is rescanned within the same phase — the same
//! `build_level_graph` / blocking-flow-DFS split used elsewhere for this
//! algorithm, adapted from an edge-reference graph to this crate's
//! residual capacity map.

use std::collections::VecDeque;

use crate::collab::Graph;
use crate::deadline::{Cadence, Deadline};
use crate::error::FlowError;

use super::options::Options;
use super::residual::{build_residual, materialize, Residual};

const DEADLINE_CADENCE: u64 = 2048;

/// Run Dinic's algorithm from `source` to `sink`, returning the maximum
/// flow value and the residual graph (remaining capacities) as a
/// [`Graph`].
///
/// # Errors
/// Same as [`super::ford_fulkerson::ford_fulkerson`].
pub fn dinic(g: &Graph, source: &str, sink: &str, opts: &Options) -> Result<(f64, Graph), FlowError> {
    let s = g.vertex_index(source).ok_or(FlowError::SourceNotFound)?;
    let t = g.vertex_index(sink).ok_or(FlowError::SinkNotFound)?;
    let mut residual = build_residual(g, opts.eps)?;
    let deadline = Deadline::from_budget_secs(opts.time_budget_secs);
    let mut cadence = Cadence::new(deadline, DEADLINE_CADENCE);

    let mut max_flow = 0.0;
    'phases: loop {
        if cadence.tick_elapsed() {
            return Err(FlowError::Cancelled);
        }
        let mut level = build_level_graph(&residual, s, t, opts.eps);
        if level[t] == usize::MAX {
            break;
        }
        let mut ptr = vec![0usize; residual.n()];
        let mut since_rebuild = 0usize;
        loop {
            if cadence.tick_elapsed() {
                return Err(FlowError::Cancelled);
            }
            let sent = blocking_flow(&mut residual, &level, &mut ptr, s, t, f64::INFINITY, opts.eps);
            if sent <= opts.eps {
                break;
            }
            max_flow += sent;
            since_rebuild += 1;
            if opts.verbose {
                eprintln!("blocking-flow phase pushed {sent} (total {max_flow})");
            }
            // Dinic only: refresh the level graph mid-phase instead of
            // waiting for it to run dry, so capacity freed by reverse
            // arcs on this phase's own augmentations is visible sooner.
            if opts.level_rebuild_interval > 0 && since_rebuild >= opts.level_rebuild_interval {
                level = build_level_graph(&residual, s, t, opts.eps);
                if level[t] == usize::MAX {
                    continue 'phases;
                }
                ptr = vec![0usize; residual.n()];
                since_rebuild = 0;
            }
        }
    }

    Ok((max_flow, materialize(g, &residual, opts.eps)))
}

/// BFS distance labeling restricted to arcs with positive residual
/// capacity. `usize::MAX` marks an unreached vertex.
fn build_level_graph(residual: &Residual, s: usize, t: usize, eps: f64) -> Vec<usize> {
    let mut level = vec![usize::MAX; residual.n()];
    level[s] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        if u == t {
            continue;
        }
        for &v in residual.neighbors(u) {
            if level[v] == usize::MAX && residual.capacity(u, v) > eps {
                level[v] = level[u] + 1;
                queue.push_back(v);
            }
        }
    }
    level
}

/// DFS a single blocking-flow path from `u` to `t` within `level`,
/// advancing `ptr[u]` past any neighbor that turns out to be a dead end
/// so later calls in the same phase never rescan it.
fn blocking_flow(
    residual: &mut Residual,
    level: &[usize],
    ptr: &mut [usize],
    u: usize,
    t: usize,
    pushed: f64,
    eps: f64,
) -> f64 {
    if u == t {
        return pushed;
    }
    while ptr[u] < residual.neighbors(u).len() {
        let v = residual.neighbors(u)[ptr[u]];
        let cap = residual.capacity(u, v);
        if level[v] == level[u] + 1 && cap > eps {
            let sent = blocking_flow(residual, level, ptr, v, t, pushed.min(cap), eps);
            if sent > eps {
                residual.push(u, v, sent);
                return sent;
            }
        }
        ptr[u] += 1;
    }
    0.0
}
