//! Strict sentinel error types.
//!
//! Every fallible entry point in this crate returns one of the enums below
//! directly — never wrapped in a backtrace-carrying `Report` or boxed
//! `dyn Error` — because a closed sentinel already tells the caller
//! everything they can act on: the same manual `Display`/`Error` shape
//! `FloydWarshallError` and `NegativeCycle` use elsewhere in this
//! workspace.

use core::fmt;

/// Errors surfaced by the TSP / ATSP solver suite (validation, dispatch,
/// exact and heuristic algorithms, local search).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TspError {
    /// The distance matrix is not square.
    NonSquare,
    /// An arc weight is negative.
    NegativeWeight,
    /// `|d(i,j) - d(j,i)| > symTol` for some `i != j` while symmetry was required.
    Asymmetry,
    /// `|d(i,i)| > symTol` for some `i`.
    NonZeroDiagonal,
    /// No finite edge connects some vertex to the rest of the instance.
    IncompleteGraph,
    /// A count or length disagrees with the expected dimension `n`.
    DimensionMismatch,
    /// The configured start vertex is outside `[0, n)`.
    StartOutOfRange,
    /// The blossom matcher was selected but is not implemented.
    MatchingNotImplemented,
    /// `Options::algo` names an algorithm this dispatcher does not know.
    UnsupportedAlgorithm,
    /// The wall-clock deadline (or cooperative cancellation) elapsed.
    TimeLimit,
    /// A node-expansion budget elapsed before a feasible tour was found.
    NodeLimit,
    /// An asymmetric instance was routed to an algorithm that requires symmetry.
    ATSPNotSupportedByAlgo,
    /// The exact solver's instance size exceeds its soft cap.
    SizeTooLarge,
}

impl fmt::Display for TspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NonSquare => "distance matrix is not square",
            Self::NegativeWeight => "negative edge weight",
            Self::Asymmetry => "matrix is not symmetric within tolerance",
            Self::NonZeroDiagonal => "diagonal entry is not within tolerance of zero",
            Self::IncompleteGraph => "no finite edge connects some vertex to the rest of the instance",
            Self::DimensionMismatch => "a count or length disagrees with the instance size",
            Self::StartOutOfRange => "start vertex is out of range",
            Self::MatchingNotImplemented => "requested matching algorithm is not implemented",
            Self::UnsupportedAlgorithm => "unknown or unsupported algorithm selector",
            Self::TimeLimit => "wall-clock time budget exceeded",
            Self::NodeLimit => "node-expansion budget exceeded",
            Self::ATSPNotSupportedByAlgo => "asymmetric instance is not supported by this algorithm",
            Self::SizeTooLarge => "instance exceeds the exact solver's size cap",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TspError {}

/// Errors surfaced by the three max-flow engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowError {
    /// The source vertex is not present in the graph.
    SourceNotFound,
    /// The sink vertex is not present in the graph.
    SinkNotFound,
    /// An edge carries a capacity this engine rejects (negative beyond `eps`).
    EdgeError {
        /// Edge tail.
        from: String,
        /// Edge head.
        to: String,
        /// The rejected capacity.
        cap: f64,
    },
    /// The run was cancelled, or its time budget elapsed, before completion.
    Cancelled,
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound => f.write_str("source vertex not found in graph"),
            Self::SinkNotFound => f.write_str("sink vertex not found in graph"),
            Self::EdgeError { from, to, cap } => {
                write!(f, "rejected capacity {cap} on edge {from} -> {to}")
            }
            Self::Cancelled => f.write_str("flow computation was cancelled"),
        }
    }
}

impl std::error::Error for FlowError {}

/// Errors surfaced by the grid analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The grid has zero rows or zero columns.
    EmptyGrid,
    /// Input rows do not all have the same length.
    NonRectangular,
    /// `src` or `dst` named no cell that exists in the grid.
    ComponentIndex,
    /// No conversion path exists between `src` and `dst`.
    NoPath,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::EmptyGrid => "grid has zero rows or zero columns",
            Self::NonRectangular => "grid rows are not all the same length",
            Self::ComponentIndex => "src or dst set named no cell in the grid",
            Self::NoPath => "no conversion path exists between src and dst",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for GridError {}
