//! State shared by the search controllers.
//!
//! [`Budget`] bounds a run by wall-clock time, an optional round cap and an
//! optional cancellation flag. [`SearchState`] tracks the current and
//! best-known solutions, and [`SearchResult`] is what every controller returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::model::{Cost, Solution};

/// Stopping conditions for one trial.
///
/// Controllers check the budget between rounds only (a tabu phase, an SA
/// temperature step, a greedy iteration), so a run can exceed `time_limit`
/// by up to one round of work.
#[derive(Debug, Clone)]
pub struct Budget {
    started: Instant,
    time_limit: Duration,
    max_rounds: Option<usize>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    /// A budget whose clock starts now.
    pub fn new(time_limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            time_limit,
            max_rounds: None,
            cancel: None,
        }
    }

    /// Also stop after `n` rounds.
    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = Some(n);
        self
    }

    /// Also stop once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Whether the run must stop before starting round number `rounds`.
    pub fn exhausted(&self, rounds: usize) -> bool {
        self.is_cancelled()
            || self.max_rounds.is_some_and(|max| rounds >= max)
            || self.elapsed() >= self.time_limit
    }
}

/// Outcome of one controller run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution found.
    pub best: Solution,
    /// Makespan of `best`.
    pub best_makespan: Cost,
    /// Makespan of the solution the controller started from.
    pub initial_makespan: Cost,
    /// Outer rounds executed (phases, temperature steps or iterations).
    pub rounds: usize,
    /// Accepted moves.
    pub accepted_moves: usize,
    /// Accepted moves that improved the best-known makespan.
    pub improving_moves: usize,
    /// Best-known makespan after each accepted move (non-increasing).
    pub history: Vec<Cost>,
    /// Whether the cancellation flag stopped the run.
    pub cancelled: bool,
    /// Whether the run stopped because no move could be generated.
    pub stalled: bool,
    /// Times the current solution was reset to the best-known one.
    pub reverts: usize,
}

/// Current and best-known solutions of a running controller.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub current: Solution,
    pub current_makespan: Cost,
    pub best: Solution,
    pub best_makespan: Cost,
    initial_makespan: Cost,
    accepted_moves: usize,
    improving_moves: usize,
    reverts: usize,
    history: Vec<Cost>,
}

impl SearchState {
    pub fn new(initial: Solution) -> Self {
        let makespan = initial.makespan();
        Self {
            best: initial.clone(),
            best_makespan: makespan,
            current: initial,
            current_makespan: makespan,
            initial_makespan: makespan,
            accepted_moves: 0,
            improving_moves: 0,
            reverts: 0,
            history: Vec::new(),
        }
    }

    /// Replaces the best-known solution without touching the current one.
    pub fn with_best(mut self, best: Solution) -> Self {
        self.best_makespan = best.makespan();
        self.best = best;
        self
    }

    /// Makes `solution` current. Returns whether it improved the best-known makespan.
    pub fn accept(&mut self, solution: Solution, makespan: Cost) -> bool {
        self.accepted_moves += 1;
        let improved = makespan < self.best_makespan;
        if improved {
            self.best = solution.clone();
            self.best_makespan = makespan;
            self.improving_moves += 1;
        }
        self.current = solution;
        self.current_makespan = makespan;
        self.history.push(self.best_makespan);
        improved
    }

    /// Resets the current solution to the best-known one.
    pub fn restore_best(&mut self) {
        self.current = self.best.clone();
        self.current_makespan = self.best_makespan;
        self.reverts += 1;
    }

    pub fn finish(self, rounds: usize, cancelled: bool, stalled: bool) -> SearchResult {
        SearchResult {
            best: self.best,
            best_makespan: self.best_makespan,
            initial_makespan: self.initial_makespan,
            rounds,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            history: self.history,
            cancelled,
            stalled,
            reverts: self.reverts,
        }
    }
}
