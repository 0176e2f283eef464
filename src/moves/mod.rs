//! Local-search moves.
//!
//! - [`improve_route`]: reorders a single route (intra-route descent)
//! - [`transfer`]: relocates one task out of the Cmax route
//! - [`swap`]: exchanges a Cmax-route task with a task of another route
//!
//! Inter-route moves never mutate their input: they clone the solution,
//! change exactly two routes, and return the clone as a [`Candidate`]
//! together with a move descriptor for tabu bookkeeping.

mod intra;
mod swap;
mod transfer;

use std::fmt;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::OprResult;
use crate::model::{Cost, CostTables, Solution};

pub use intra::{improve_route, IntraConfig};
pub use swap::{swap, swap_available};
pub use transfer::{transfer, transfer_available};

/// Descriptor of a transfer: `task` left route `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransferMove {
    pub task: usize,
    pub source: usize,
}

/// Descriptor of a swap: `(task, route)` before the exchange, for the
/// Cmax-route task (`first`) and its partner (`second`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwapMove {
    pub first: (usize, usize),
    pub second: (usize, usize),
}

/// A neighbor solution produced by a move.
#[derive(Debug, Clone)]
pub struct Candidate<M> {
    /// The full neighbor solution.
    pub solution: Solution,
    /// The applied move.
    pub mv: M,
    /// Makespan of `solution`.
    pub makespan: Cost,
}

impl<M> Candidate<M> {
    pub fn new(solution: Solution, mv: M) -> Self {
        let makespan = solution.makespan();
        Self {
            solution,
            mv,
            makespan,
        }
    }
}

/// The inter-route neighborhood a controller is currently exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    Transfer,
    Swap,
}

impl Phase {
    /// The phase that follows `self` in the alternation.
    pub fn next(self) -> Phase {
        match self {
            Phase::Transfer => Phase::Swap,
            Phase::Swap => Phase::Transfer,
        }
    }

    /// Whether this phase's move can be generated from `solution`.
    pub fn available(self, solution: &Solution, tables: &CostTables) -> bool {
        match self {
            Phase::Transfer => transfer_available(solution, tables),
            Phase::Swap => swap_available(solution, tables),
        }
    }

    /// Generates one neighbor with this phase's move, dropping the descriptor.
    pub fn neighbor<R: Rng>(
        self,
        solution: &Solution,
        tables: &CostTables,
        intra: &IntraConfig,
        rng: &mut R,
    ) -> OprResult<Solution> {
        Ok(match self {
            Phase::Transfer => transfer(solution, tables, intra, rng)?.solution,
            Phase::Swap => swap(solution, tables, intra, rng)?.solution,
        })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Transfer => write!(f, "transfer"),
            Phase::Swap => write!(f, "swap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_alternates() {
        assert_eq!(Phase::Transfer.next(), Phase::Swap);
        assert_eq!(Phase::Swap.next(), Phase::Transfer);
        assert_eq!(Phase::Transfer.next().next(), Phase::Transfer);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Transfer.to_string(), "transfer");
        assert_eq!(Phase::Swap.to_string(), "swap");
    }
}
