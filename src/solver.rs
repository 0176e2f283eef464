//! Multi-trial driver.
//!
//! [`Solver::solve`] runs independent trials, each with its own seed, its own
//! initial solution and fresh controller memory, and keeps the best result.
//! Only the final best-of comparison looks at more than one trial, so with
//! the `parallel` feature trials can run on rayon.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::construction::build_initial_solution;
use crate::error::OprResult;
use crate::greedy::{GreedyConfig, GreedyRunner};
use crate::model::{Cost, CostTables, Solution};
use crate::random::{create_rng, trial_seed};
use crate::sa::{SaConfig, SaRunner};
use crate::search::{Budget, SearchResult};
use crate::tabu::{TabuConfig, TabuRunner};

/// Which controller improves the initial solution of each trial.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStrategy {
    /// Alternating transfer/swap tabu search.
    Tabu(TabuConfig),
    /// Simulated annealing over the same two neighborhoods.
    Annealing(SaConfig),
    /// Memoryless random alternation with periodic revert to the best.
    Greedy(GreedyConfig),
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::Tabu(TabuConfig::default())
    }
}

impl SearchStrategy {
    fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Tabu(_) => "tabu",
            SearchStrategy::Annealing(_) => "annealing",
            SearchStrategy::Greedy(_) => "greedy",
        }
    }
}

/// Configuration of a full solve.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_oproute::solver::{SearchStrategy, SolverConfig};
/// use u_oproute::sa::SaConfig;
///
/// let config = SolverConfig::default()
///     .with_trials(3)
///     .with_time_limit(Duration::from_millis(200))
///     .with_seed(7)
///     .with_strategy(SearchStrategy::Annealing(SaConfig::default()));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Number of independent trials.
    pub trials: usize,
    /// Wall-clock budget of each trial.
    pub time_limit: Duration,
    /// Base seed; trial `i` uses `seed + i`. `None` draws a fresh seed per trial.
    pub seed: Option<u64>,
    /// Run trials concurrently (requires the `parallel` feature).
    pub parallel: bool,
    /// Optional cap on controller rounds per trial.
    pub max_rounds: Option<usize>,
    /// Controller applied after construction.
    pub strategy: SearchStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            trials: 5,
            time_limit: Duration::from_secs(60),
            seed: None,
            parallel: false,
            max_rounds: None,
            strategy: SearchStrategy::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_trials(mut self, n: usize) -> Self {
        self.trials = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = Some(n);
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validates the configuration, including the strategy's own parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.trials == 0 {
            return Err("trials must be at least 1".into());
        }
        match &self.strategy {
            SearchStrategy::Tabu(config) => config.validate(),
            SearchStrategy::Annealing(config) => config.validate(),
            SearchStrategy::Greedy(config) => config.validate(),
        }
    }
}

/// Summary of one trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialOutcome {
    /// Trial index, starting at 0.
    pub trial: usize,
    /// Seed the trial's generator was created from.
    pub seed: u64,
    /// Wall-clock time spent in construction and search.
    pub elapsed: Duration,
    /// Best makespan found by the trial.
    pub makespan: Cost,
}

/// Result of [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Best solution over all trials.
    pub best: Solution,
    /// Makespan of `best`.
    pub best_makespan: Cost,
    /// Index of the trial that produced `best`.
    pub best_trial: usize,
    /// One entry per trial, in trial order.
    pub trials: Vec<TrialOutcome>,
    /// Whether the cancellation flag cut the solve short.
    pub cancelled: bool,
}

impl SolveReport {
    /// Mean best makespan over the trials.
    pub fn mean_makespan(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trials.iter().map(|t| t.makespan as f64).sum();
        total / self.trials.len() as f64
    }

    /// Total wall-clock time summed over the trials.
    pub fn total_elapsed(&self) -> Duration {
        self.trials.iter().map(|t| t.elapsed).sum()
    }
}

/// Multi-trial solver.
pub struct Solver;

impl Solver {
    /// Runs `config.trials` independent trials and returns the best solution.
    ///
    /// # Errors
    ///
    /// Returns `InfeasibleInput` as soon as any trial reports it (for example
    /// a task no operator can perform).
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn solve(tables: &CostTables, config: &SolverConfig) -> OprResult<SolveReport> {
        Self::solve_with_cancel(tables, config, None)
    }

    /// Like [`Solver::solve`], but every trial also stops once `cancel` is set.
    pub fn solve_with_cancel(
        tables: &CostTables,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> OprResult<SolveReport> {
        config.validate().expect("invalid SolverConfig");

        info!(
            strategy = config.strategy.name(),
            trials = config.trials,
            tasks = tables.num_tasks(),
            operators = tables.num_operators(),
            "solve started"
        );

        let results = run_trials(tables, config, cancel.as_ref())?;

        let mut trials = Vec::with_capacity(results.len());
        let mut best: Option<(usize, SearchResult)> = None;
        let mut cancelled = false;
        for (outcome, result) in results {
            cancelled |= result.cancelled;
            let replace = best
                .as_ref()
                .is_none_or(|(_, b)| result.best_makespan < b.best_makespan);
            if replace {
                best = Some((outcome.trial, result));
            }
            trials.push(outcome);
        }

        let Some((best_trial, best)) = best else {
            unreachable!("validated config runs at least one trial");
        };

        info!(
            best_makespan = best.best_makespan,
            best_trial,
            cancelled,
            "solve finished"
        );

        Ok(SolveReport {
            best_makespan: best.best_makespan,
            best: best.best,
            best_trial,
            trials,
            cancelled,
        })
    }
}

#[cfg(feature = "parallel")]
fn run_trials(
    tables: &CostTables,
    config: &SolverConfig,
    cancel: Option<&Arc<AtomicBool>>,
) -> OprResult<Vec<(TrialOutcome, SearchResult)>> {
    if config.parallel {
        (0..config.trials)
            .into_par_iter()
            .map(|trial| run_trial(tables, config, trial, cancel))
            .collect()
    } else {
        (0..config.trials)
            .map(|trial| run_trial(tables, config, trial, cancel))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_trials(
    tables: &CostTables,
    config: &SolverConfig,
    cancel: Option<&Arc<AtomicBool>>,
) -> OprResult<Vec<(TrialOutcome, SearchResult)>> {
    (0..config.trials)
        .map(|trial| run_trial(tables, config, trial, cancel))
        .collect()
}

/// One independent trial: construction followed by the configured controller.
fn run_trial(
    tables: &CostTables,
    config: &SolverConfig,
    trial: usize,
    cancel: Option<&Arc<AtomicBool>>,
) -> OprResult<(TrialOutcome, SearchResult)> {
    let started = Instant::now();
    let seed = trial_seed(config.seed, trial);
    let mut rng = create_rng(seed);

    let mut budget = Budget::new(config.time_limit);
    if let Some(n) = config.max_rounds {
        budget = budget.with_max_rounds(n);
    }
    if let Some(flag) = cancel {
        budget = budget.with_cancel(Arc::clone(flag));
    }

    let initial = build_initial_solution(tables, &mut rng)?;
    debug!(trial, seed, makespan = initial.makespan(), "initial solution built");

    let result = match &config.strategy {
        SearchStrategy::Tabu(c) => TabuRunner::run(tables, initial, c, &budget, &mut rng)?,
        SearchStrategy::Annealing(c) => SaRunner::run(tables, initial, c, &budget, &mut rng)?,
        SearchStrategy::Greedy(c) => GreedyRunner::run(tables, initial, c, &budget, &mut rng)?,
    };
    debug_assert!(result.best.check(tables).is_empty());

    let outcome = TrialOutcome {
        trial,
        seed,
        elapsed: started.elapsed(),
        makespan: result.best_makespan,
    };
    info!(
        trial,
        seed,
        elapsed_secs = outcome.elapsed.as_secs_f64(),
        makespan = outcome.makespan,
        rounds = result.rounds,
        "trial finished"
    );

    Ok((outcome, result))
}
