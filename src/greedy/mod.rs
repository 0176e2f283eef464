//! Greedy random alternation.
//!
//! A memoryless controller kept for comparison with tabu search: every
//! generated neighbor becomes the current solution, the next phase is drawn
//! at random, and the search jumps back to the best-known solution once it
//! has improved more than `revert_after` times since the last jump.

mod config;
mod runner;

pub use config::GreedyConfig;
pub use runner::GreedyRunner;
