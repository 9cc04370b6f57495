//! Solver configuration: explicit fields over named parameters.
//! Every knob is a field on [`Options`]; a single
//! `Options::default()` provides every default, and `with_*` builders let
//! callers override one field at a time without naming the rest.

/// Which main algorithm the dispatcher should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// MST + odd-vertex matching + Eulerian shortcut; symmetric only.
    Christofides,
    /// Exact Held–Karp dynamic program; symmetric or asymmetric.
    ExactHeldKarp,
    /// Exact branch-and-bound; symmetric or asymmetric.
    BranchAndBound,
    /// A canonical ring tour polished by 2-opt only.
    TwoOptOnly,
    /// A canonical ring tour polished by 3-opt (optionally 2-opt warm-up).
    ThreeOptOnly,
}

/// Matching strategy for Christofides' odd-vertex pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingAlgo {
    /// Deterministic nearest-remaining-partner pairing. No optimality
    /// guarantee, but never fails.
    Greedy,
    /// True minimum-weight perfect matching. Not implemented; the
    /// dispatcher falls back to [`MatchingAlgo::Greedy`] when selected.
    Blossom,
}

/// Lower-bound strategy for branch-and-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundAlgo {
    /// `LB = costSoFar`; testing only, prunes nothing.
    NoBound,
    /// Degree-1 relaxation: cheapest unfixed outgoing/incoming arc per vertex.
    SimpleBound,
    /// Held–Karp 1-tree Lagrangian dual (root only, symmetric only).
    OneTreeBound,
}

/// Which local-search move to accept first during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprovementPolicy {
    /// Accept the first improving move found, then restart the scan.
    First,
    /// Scan every candidate in the sweep, accept only the best.
    Best,
}

/// All solver knobs. `time_budget == Duration::ZERO` means "no
/// deadline"; `seed == 0` selects the fixed internal RNG stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub start_vertex: usize,
    pub algo: Algorithm,
    pub symmetric: bool,
    pub matching_algo: MatchingAlgo,
    pub bound_algo: BoundAlgo,
    pub run_metric_closure: bool,
    pub local_search: bool,
    pub local_search_max_iters: usize,
    pub improvement_policy: ImprovementPolicy,
    pub shuffle_neighborhood: bool,
    pub eps: f64,
    pub time_budget_secs: f64,
    pub seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            start_vertex: 0,
            algo: Algorithm::Christofides,
            symmetric: true,
            matching_algo: MatchingAlgo::Greedy,
            bound_algo: BoundAlgo::SimpleBound,
            run_metric_closure: false,
            local_search: false,
            local_search_max_iters: 0,
            improvement_policy: ImprovementPolicy::First,
            shuffle_neighborhood: false,
            eps: 1e-12,
            time_budget_secs: 0.0,
            seed: 0,
        }
    }
}

impl Options {
    pub fn with_start_vertex(mut self, v: usize) -> Self {
        self.start_vertex = v;
        self
    }

    pub fn with_algo(mut self, algo: Algorithm) -> Self {
        self.algo = algo;
        self
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    pub fn with_matching_algo(mut self, m: MatchingAlgo) -> Self {
        self.matching_algo = m;
        self
    }

    pub fn with_bound_algo(mut self, b: BoundAlgo) -> Self {
        self.bound_algo = b;
        self
    }

    pub fn with_metric_closure(mut self, enabled: bool) -> Self {
        self.run_metric_closure = enabled;
        self
    }

    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    pub fn with_local_search_max_iters(mut self, n: usize) -> Self {
        self.local_search_max_iters = n;
        self
    }

    pub fn with_improvement_policy(mut self, p: ImprovementPolicy) -> Self {
        self.improvement_policy = p;
        self
    }

    pub fn with_shuffle_neighborhood(mut self, enabled: bool) -> Self {
        self.shuffle_neighborhood = enabled;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_time_budget_secs(mut self, secs: f64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
