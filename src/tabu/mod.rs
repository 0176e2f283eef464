//! Tabu Search (TS).
//!
//! The default controller. Alternates transfer and swap phases over the
//! trial solution, choosing the best candidate of a random pool that is not
//! forbidden by the phase's tabu list, unless it beats the best-known
//! makespan (aspiration).
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search, Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::TabuRunner;
pub use types::{TabuEviction, TabuList};
