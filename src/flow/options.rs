//! Max-flow engine configuration, mirroring the TSP suite's
//! explicit-`Options`-over-named-parameters convention.

/// All three max-flow engines' knobs. `time_budget_secs == 0.0` means "no
/// deadline". `level_rebuild_interval` is Dinic-only: it rebuilds the
/// level graph every N accepted augmentations instead of once per phase
/// (0 = rebuild only when the current phase runs dry, the textbook
/// shape); the other two engines ignore it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub eps: f64,
    pub time_budget_secs: f64,
    pub verbose: bool,
    pub level_rebuild_interval: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { eps: 1e-9, time_budget_secs: 0.0, verbose: false, level_rebuild_interval: 0 }
    }
}

impl Options {
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_time_budget_secs(mut self, secs: f64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_level_rebuild_interval(mut self, interval: usize) -> Self {
        self.level_rebuild_interval = interval;
        self
    }
}
