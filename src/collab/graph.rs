//! The graph collaborator: a flag-configurable adjacency-list container.
//!
//! Vertex identity is a stable `String`; edges carry an integer weight.
//! Internally this is an `IndexSet<String>` plus `IndexMap<usize, Vec<Edge>>`,
//! the same "adjacency list keyed by the node value" shape as a `GraphMap`,
//! built on a modern, index-stable container.

use indexmap::{IndexMap, IndexSet};

/// One outgoing arc, recorded once per direction the graph actually stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Index of the neighbor vertex, see [`Graph::vertex_index`].
    pub to: usize,
    /// Integer edge weight.
    pub weight: i64,
}

/// A directed-or-undirected, weighted-or-unweighted adjacency-list graph
/// with optional self-loops and parallel edges, keyed by stable string
/// vertex ids.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    weighted: bool,
    allow_loops: bool,
    allow_multi: bool,
    ids: IndexSet<String>,
    adjacency: IndexMap<usize, Vec<Edge>>,
}

impl Graph {
    /// Build an empty graph with the given configuration flags.
    pub fn new(directed: bool, weighted: bool, allow_loops: bool, allow_multi: bool) -> Self {
        Self {
            directed,
            weighted,
            allow_loops,
            allow_multi,
            ids: IndexSet::new(),
            adjacency: IndexMap::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn allows_loops(&self) -> bool {
        self.allow_loops
    }

    pub fn allows_multi(&self) -> bool {
        self.allow_multi
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add a vertex, returning its stable index. Adding the same id twice
    /// is a no-op and returns the existing index.
    pub fn add_vertex(&mut self, id: impl Into<String>) -> usize {
        let (index, _) = self.ids.insert_full(id.into());
        self.adjacency.entry(index).or_default();
        index
    }

    /// Remove a vertex and every edge touching it. Remaining vertex
    /// indices below the removed one are unaffected; indices above it
    /// shift down by one, matching `IndexSet::shift_remove`'s contract.
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        let Some(index) = self.ids.get_index_of(id) else {
            return false;
        };
        self.ids.shift_remove_index(index);
        self.adjacency.shift_remove(&index);
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.to != index);
            for e in edges.iter_mut() {
                if e.to > index {
                    e.to -= 1;
                }
            }
        }
        let remap: IndexMap<usize, Vec<Edge>> = self
            .adjacency
            .drain(..)
            .map(|(k, v)| (if k > index { k - 1 } else { k }, v))
            .collect();
        self.adjacency = remap;
        true
    }

    /// Insert an edge. Respects `allow_loops` / `allow_multi`; weight is
    /// ignored (stored as `0`) when `weighted` is `false`. Returns `false`
    /// if the edge was rejected by a flag.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: i64) -> bool {
        let fi = self.add_vertex(from);
        let ti = self.add_vertex(to);
        if fi == ti && !self.allow_loops {
            return false;
        }
        let w = if self.weighted { weight } else { 0 };
        if !self.allow_multi && self.has_edge_between(fi, ti) {
            return false;
        }
        self.adjacency.entry(fi).or_default().push(Edge { to: ti, weight: w });
        if !self.directed && fi != ti {
            self.adjacency.entry(ti).or_default().push(Edge { to: fi, weight: w });
        }
        true
    }

    fn has_edge_between(&self, from: usize, to: usize) -> bool {
        self.adjacency
            .get(&from)
            .is_some_and(|edges| edges.iter().any(|e| e.to == to))
    }

    /// Remove every edge `from -> to` (and, if undirected, `to -> from`).
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(fi), Some(ti)) = (self.vertex_index(from), self.vertex_index(to)) else {
            return false;
        };
        let mut removed = false;
        if let Some(edges) = self.adjacency.get_mut(&fi) {
            let before = edges.len();
            edges.retain(|e| e.to != ti);
            removed |= edges.len() != before;
        }
        if !self.directed && fi != ti {
            if let Some(edges) = self.adjacency.get_mut(&ti) {
                let before = edges.len();
                edges.retain(|e| e.to != fi);
                removed |= edges.len() != before;
            }
        }
        removed
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.vertex_index(from), self.vertex_index(to)) {
            (Some(fi), Some(ti)) => self.has_edge_between(fi, ti),
            _ => false,
        }
    }

    /// Stable index for a vertex id, if present.
    pub fn vertex_index(&self, id: &str) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    /// Vertex id for a stable index, if present.
    pub fn vertex_id(&self, index: usize) -> Option<&str> {
        self.ids.get_index(index).map(String::as_str)
    }

    /// All vertex ids, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// The outgoing edge set for `id`'s index, or an empty slice if the
    /// vertex is unknown.
    pub fn neighbors(&self, index: usize) -> &[Edge] {
        self.adjacency.get(&index).map_or(&[], Vec::as_slice)
    }

    /// Every edge in the graph, as `(from_index, to_index, weight)`,
    /// directed edges listed once and undirected edges listed once per
    /// stored direction (matching `neighbors`).
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.adjacency.iter().flat_map(|(&from, edges)| {
            edges.iter().map(move |e| (from, e.to, e.weight))
        })
    }

    /// A deep clone: same vertices, edges and flags.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }

    /// A clone carrying only this graph's configuration flags, with no
    /// vertices or edges.
    pub fn empty_clone(&self) -> Self {
        Self::new(self.directed, self.weighted, self.allow_loops, self.allow_multi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edge_is_visible_both_ways() {
        let mut g = Graph::new(false, true, false, false);
        g.add_edge("a", "b", 5);
        assert!(g.has_edge("a", "b"));
        assert!(g.has_edge("b", "a"));
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut g = Graph::new(true, true, false, false);
        g.add_edge("a", "b", 5);
        assert!(g.has_edge("a", "b"));
        assert!(!g.has_edge("b", "a"));
    }

    #[test]
    fn loops_rejected_unless_allowed() {
        let mut g = Graph::new(true, false, false, false);
        assert!(!g.add_edge("a", "a", 0));
        let mut g2 = Graph::new(true, false, true, false);
        assert!(g2.add_edge("a", "a", 0));
    }

    #[test]
    fn multi_edges_coalesce_unless_allowed() {
        let mut g = Graph::new(true, true, false, false);
        g.add_edge("a", "b", 1);
        assert!(!g.add_edge("a", "b", 2));
        let mut g2 = Graph::new(true, true, false, true);
        g2.add_edge("a", "b", 1);
        assert!(g2.add_edge("a", "b", 2));
        assert_eq!(g2.edges().count(), 2);
    }

    #[test]
    fn empty_clone_preserves_flags_only() {
        let mut g = Graph::new(true, true, true, true);
        g.add_edge("a", "b", 1);
        let e = g.empty_clone();
        assert!(e.is_empty());
        assert_eq!(e.is_directed(), g.is_directed());
        assert_eq!(e.allows_multi(), g.allows_multi());
    }
}
