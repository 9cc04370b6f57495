//! Max-flow engine suite: Ford–Fulkerson, Edmonds–Karp, and
//! Dinic's algorithm, each against the same residual-graph representation
//! built from a [`crate::collab::Graph`].

pub mod dinic;
pub mod edmonds_karp;
pub mod ford_fulkerson;
pub mod options;
pub mod residual;

pub use dinic::dinic;
pub use edmonds_karp::edmonds_karp;
pub use ford_fulkerson::ford_fulkerson;
pub use options::Options;
