//! Multi-operator manual-action routing.
//!
//! Assigns skill-constrained tasks to operators and orders each operator's
//! route so that the longest route (the makespan, Cmax) is as short as
//! possible. Every route starts at a shared start room.
//!
//! - **Construction**: scarcity-tier greedy builder; tasks with fewer
//!   eligible operators are placed first, each on the operator whose route
//!   grows least.
//! - **Moves**: intra-route randomized swap descent, plus two inter-route
//!   moves applied to the Cmax route: transfer (relocate one task) and swap
//!   (exchange two tasks between routes).
//! - **Tabu Search (TS)**: alternating transfer/swap phases with candidate
//!   pools, short-term memory and aspiration, under a wall-clock budget.
//! - **Simulated Annealing (SA)** and **greedy random alternation**:
//!   alternative controllers over the same neighborhoods.
//! - **Solver**: independent trials, each with its own seed, best-of result.
//! - **Report**: walked arcs and per-task timings as semicolon-separated
//!   output, a run log and a distance matrix cache.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_oproute::model::CostTables;
//! use u_oproute::solver::{Solver, SolverConfig};
//!
//! let tables = CostTables::new(
//!     vec![vec![true, true], vec![true, false], vec![true, true]],
//!     vec![vec![0, 4, 6], vec![4, 0, 3], vec![6, 3, 0]],
//!     vec![2, 5, 1],
//!     vec![3, 3, 3],
//! )
//! .unwrap();
//!
//! let config = SolverConfig::default()
//!     .with_seed(42)
//!     .with_time_limit(Duration::from_millis(50));
//! let report = Solver::solve(&tables, &config).unwrap();
//! assert!(report.best.check(&tables).is_empty());
//! assert_eq!(report.trials.len(), 5);
//! ```

pub mod construction;
pub mod error;
pub mod greedy;
pub mod model;
pub mod moves;
pub mod random;
pub mod report;
pub mod sa;
pub mod search;
pub mod solver;
pub mod tabu;

pub use error::{Infeasibility, OprError, OprResult};
pub use model::{Cost, CostTables, Operator, Route, Solution, Task};
pub use solver::{SearchStrategy, SolveReport, Solver, SolverConfig, TrialOutcome};
