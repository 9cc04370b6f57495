//! Residual-graph construction. Builds a dense `(from, to) ->
//! remaining capacity` map from a [`Graph`] collaborator, coalescing
//! parallel edges by summing their capacities, dropping self-loops
//! (a self-loop can never carry net flow), and creating the zero-capacity
//! reverse arc every augmenting-path search needs, whether or not the
//! original graph already had one in that direction.

use indexmap::IndexMap;

use crate::collab::Graph;
use crate::error::FlowError;

/// A residual capacity graph over the same `[0, n)` vertex indices as the
/// originating [`Graph`].
pub struct Residual {
    n: usize,
    adjacency: Vec<Vec<usize>>,
    cap: IndexMap<(usize, usize), f64>,
}

impl Residual {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    pub fn capacity(&self, u: usize, v: usize) -> f64 {
        self.cap.get(&(u, v)).copied().unwrap_or(0.0)
    }

    /// Push `amount` of flow along arc `u -> v`: decrease its residual
    /// capacity and credit the reverse arc `v -> u` by the same amount.
    pub fn push(&mut self, u: usize, v: usize, amount: f64) {
        *self.cap.entry((u, v)).or_insert(0.0) -= amount;
        *self.cap.entry((v, u)).or_insert(0.0) += amount;
    }

    /// `(from, to, residual capacity)` for every arc with capacity above
    /// `eps`, in insertion order — used to materialize the residual graph
    /// the engines return to the caller.
    pub fn positive_arcs(&self, eps: f64) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cap
            .iter()
            .filter(move |&(_, &c)| c > eps)
            .map(|(&(u, v), &c)| (u, v, c))
    }
}

/// Materialize the residual graph (remaining positive capacities) as an
/// output [`Graph`], re-quantizing to the collaborator's integer edge
/// weights — the crate-wide `Graph` only stores `i64` weights, the same
/// contract the TSP matrix builder already works within.
pub fn materialize(original: &Graph, residual: &Residual, eps: f64) -> Graph {
    let mut out = original.empty_clone();
    for i in 0..residual.n() {
        let id = original.vertex_id(i).unwrap_or_default();
        out.add_vertex(id);
    }
    for (u, v, cap) in residual.positive_arcs(eps) {
        let from = original.vertex_id(u).unwrap_or_default();
        let to = original.vertex_id(v).unwrap_or_default();
        out.add_edge(from, to, cap.round() as i64);
    }
    out
}

/// Build the residual graph for `g`, validating capacities against `eps`
/// (any edge weight below `-eps` is rejected; an unweighted graph treats
/// every edge as unit capacity).
///
/// # Errors
/// [`FlowError::EdgeError`] if an edge carries a negative capacity beyond
/// `eps`.
pub fn build_residual(g: &Graph, eps: f64) -> Result<Residual, FlowError> {
    let n = g.len();
    let mut cap: IndexMap<(usize, usize), f64> = IndexMap::new();

    for (from, to, weight) in g.edges() {
        if from == to {
            continue;
        }
        let w = if g.is_weighted() { weight as f64 } else { 1.0 };
        if w < -eps {
            return Err(FlowError::EdgeError {
                from: g.vertex_id(from).unwrap_or_default().to_owned(),
                to: g.vertex_id(to).unwrap_or_default().to_owned(),
                cap: w,
            });
        }
        let c = w.max(0.0);
        *cap.entry((from, to)).or_insert(0.0) += c;
        cap.entry((to, from)).or_insert(0.0);
    }

    let mut adjacency = vec![Vec::new(); n];
    for &(u, v) in cap.keys() {
        adjacency[u].push(v);
    }

    Ok(Residual { n, adjacency, cap })
}
