//! Odd-vertex matching. Given the even-sized set of MST vertices
//! with odd degree, produce undirected edges to add to the MST adjacency
//! (parallel to existing MST edges is fine — the result is a multigraph,
//! consumed by the Eulerian-circuit step).

use crate::collab::Matrix;
use crate::error::TspError;

use super::options::MatchingAlgo;

/// Degree-parity odd vertices of an MST adjacency list (LSB of degree).
pub fn odd_vertices(adjacency: &[Vec<usize>]) -> Vec<usize> {
    adjacency
        .iter()
        .enumerate()
        .filter(|(_, neighbors)| neighbors.len() & 1 == 1)
        .map(|(v, _)| v)
        .collect()
}

/// Add a matching over `odd` into `adjacency` in place, per
/// `MatchingAlgo`. The blossom path deliberately never mutates
/// `adjacency` — the dispatcher is responsible for the deterministic
/// fallback to [`MatchingAlgo::Greedy`].
pub fn add_matching(
    adjacency: &mut [Vec<usize>],
    odd: &[usize],
    dist: &Matrix,
    algo: MatchingAlgo,
) -> Result<(), TspError> {
    match algo {
        MatchingAlgo::Greedy => {
            greedy_matching(adjacency, odd, dist);
            Ok(())
        }
        MatchingAlgo::Blossom => Err(TspError::MatchingNotImplemented),
    }
}

/// Deterministic `O(|odd|^2)` greedy pairing: repeatedly pop the last
/// unmatched vertex and pair it with its nearest still-unmatched partner
/// (ties broken by ascending index).
fn greedy_matching(adjacency: &mut [Vec<usize>], odd: &[usize], dist: &Matrix) {
    let mut remaining: Vec<usize> = odd.to_vec();
    while let Some(u) = remaining.pop() {
        let mut best: Option<(usize, f64)> = None;
        for &v in &remaining {
            let w = dist.at(u, v).expect("in-bounds");
            let better = match best {
                Some((_, bw)) => w < bw,
                None => true,
            };
            if better {
                best = Some((v, w));
            }
        }
        if let Some((v, _)) = best {
            remaining.retain(|&x| x != v);
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
    }
}
