//! Cooperative cancellation (§5, §9 "cooperative cancellation over
//! exceptions"). A positive wall-clock budget is captured as an absolute
//! deadline at entry; every suspension point polls it at a fixed cadence
//! and returns `TimeLimit` the moment it elapses, never a partial result.

use std::time::{Duration, Instant};

/// An absolute deadline derived from a `Options`-style `time_budget_secs`
/// (`0.0` means "no deadline").
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Capture `now + budget_secs` as the deadline; `budget_secs <= 0.0`
    /// means "no deadline".
    pub fn from_budget_secs(budget_secs: f64) -> Self {
        if budget_secs > 0.0 {
            Self { at: Some(Instant::now() + Duration::from_secs_f64(budget_secs)) }
        } else {
            Self { at: None }
        }
    }

    /// No deadline at all.
    pub fn none() -> Self {
        Self { at: None }
    }

    pub fn is_elapsed(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

/// A tick counter that only actually checks the deadline every `cadence`
/// calls, to keep hot-loop overhead negligible (§5's "periodic deadline
/// check" cadences: Held–Karp ~1024, BnB ~4096, 2-opt ~2048, 3-opt ~4096,
/// 1-tree ~2048).
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    deadline: Deadline,
    cadence: u64,
    ticks: u64,
}

impl Cadence {
    pub fn new(deadline: Deadline, cadence: u64) -> Self {
        Self { deadline, cadence, ticks: 0 }
    }

    /// Advance one tick; returns `true` exactly when the deadline has
    /// elapsed at a checkpoint.
    pub fn tick_elapsed(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks % self.cadence == 0 {
            self.deadline.is_elapsed()
        } else {
            false
        }
    }
}
