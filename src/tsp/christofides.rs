//! Christofides' pipeline for symmetric metric TSP: MST → odd-vertex
//! matching → Eulerian circuit → shortcut → canonicalize.
//!
//! The 1.5·OPT guarantee holds only when [`MatchingAlgo::Blossom`] (a true
//! minimum-weight perfect matching) is used; with
//! [`MatchingAlgo::Greedy`] the tour remains a valid Hamiltonian cycle but
//! the factor is not guaranteed.

use crate::collab::Matrix;
use crate::error::TspError;

use super::cost::tour_cost;
use super::euler::eulerian_circuit;
use super::matching::{add_matching, odd_vertices};
use super::mst::prim_mst;
use super::options::MatchingAlgo;
use super::tour::{canonicalize_orientation, rotate_to_start, shortcut, validate, Tour};

/// Run the Christofides pipeline and return a validated, canonicalized
/// tour with its stabilized cost.
pub fn christofides(dist: &Matrix, start: usize, matching_algo: MatchingAlgo) -> Result<(Tour, f64), TspError> {
    let n = dist.rows();
    let mst = prim_mst(dist)?;
    let mut adjacency = mst.adjacency;

    let odd = odd_vertices(&adjacency);
    add_matching(&mut adjacency, &odd, dist, matching_algo)?;

    let eulerian = eulerian_circuit(&adjacency, 0);
    let mut tour = shortcut(&eulerian, n, start);

    rotate_to_start(&mut tour, start);
    canonicalize_orientation(&mut tour);
    validate(&tour, n, start)?;

    let cost = tour_cost(dist, &tour)?;
    Ok((tour, cost))
}
