//! Prim's minimum spanning tree on a dense distance matrix, `O(n^2)`.
//! Starts from vertex `0`; ties broken by ascending index.

use crate::collab::Matrix;
use crate::error::TspError;

use super::cost::stabilize;

/// An undirected MST adjacency list: `adjacency[v]` holds `v`'s MST
/// neighbors in the order they were attached.
pub struct MstResult {
    pub total_weight: f64,
    pub adjacency: Vec<Vec<usize>>,
}

/// Build a minimum spanning tree rooted (for iteration purposes only,
/// not structurally) at vertex `0`.
///
/// # Errors
/// Returns [`TspError::IncompleteGraph`] if no finite edge ever connects
/// the growing tree to the remaining vertices.
pub fn prim_mst(dist: &Matrix) -> Result<MstResult, TspError> {
    let n = dist.rows();
    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent = vec![usize::MAX; n];
    key[0] = 0.0;
    let mut adjacency = vec![Vec::new(); n];
    let mut total_weight = 0.0;

    for _ in 0..n {
        let mut best: Option<usize> = None;
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            let better = match best {
                Some(b) => key[v] < key[b],
                None => true,
            };
            if better {
                best = Some(v);
            }
        }
        let Some(u) = best else {
            return Err(TspError::IncompleteGraph);
        };
        if key[u].is_infinite() {
            return Err(TspError::IncompleteGraph);
        }
        in_tree[u] = true;
        if parent[u] != usize::MAX {
            adjacency[u].push(parent[u]);
            adjacency[parent[u]].push(u);
            total_weight += key[u];
        }
        for v in 0..n {
            if in_tree[v] || u == v {
                continue;
            }
            let w = dist.at(u, v).expect("in-bounds");
            if w.is_finite() && w < key[v] {
                key[v] = w;
                parent[v] = u;
            }
        }
    }

    Ok(MstResult { total_weight: stabilize(total_weight), adjacency })
}
