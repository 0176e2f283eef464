//! Simulated Annealing (SA).
//!
//! Alternative controller sharing the transfer and swap moves with tabu
//! search. A worsening candidate is accepted with probability
//! `exp((current - candidate) / T)`; `T` starts at a fraction of the
//! initial makespan and cools after every step.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::SaRunner;
