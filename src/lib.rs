//! **graphcore** is a TSP/ATSP solver suite, a max-flow engine suite, and a
//! 2D-grid connectivity analyzer, sharing a small adjacency-list [`Graph`]
//! and dense [`Matrix`] collaborator.
//!
//! - [`tsp`]: exact (Held–Karp, branch-and-bound), heuristic (Christofides),
//!   and local-search (2-opt/2-opt*, 3-opt/3-opt*) tour solvers.
//! - [`flow`]: Ford–Fulkerson, Edmonds–Karp, and Dinic max-flow engines over
//!   a shared residual-capacity representation.
//! - [`grid`]: connected components and minimum-conversion island expansion
//!   over a rectangular integer grid.
//!
//! Every fallible entry point returns a strict sentinel error from
//! [`error`] rather than a boxed `dyn Error`. Cancellation is cooperative,
//! governed by [`deadline`]; where algorithms need randomness (tie-breaking
//! shuffles in local search) it comes from the deterministic substreams in
//! [`rng`].

pub mod collab;
pub mod deadline;
pub mod error;
pub mod flow;
pub mod grid;
pub mod rng;
pub mod tsp;

pub use collab::{Graph, Matrix};
pub use error::{FlowError, GridError, TspError};
