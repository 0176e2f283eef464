//! Greedy alternation configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::moves::{IntraConfig, Phase};

/// Configuration for the greedy random-alternation controller.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GreedyConfig {
    /// Phase of the first move.
    pub first_phase: Phase,
    /// The current solution is reset to the best-known one once the
    /// improvement counter exceeds this value.
    pub revert_after: usize,
    /// Intra-route descent applied inside each move and to the starting routes.
    pub intra: IntraConfig,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            first_phase: Phase::Swap,
            revert_after: 10,
            intra: IntraConfig::default(),
        }
    }
}

impl GreedyConfig {
    pub fn with_first_phase(mut self, phase: Phase) -> Self {
        self.first_phase = phase;
        self
    }

    pub fn with_revert_after(mut self, n: usize) -> Self {
        self.revert_after = n;
        self
    }

    pub fn with_intra(mut self, intra: IntraConfig) -> Self {
        self.intra = intra;
        self
    }

    /// Validates the configuration.
    ///
    /// Every field value is meaningful: a zero `revert_after` reverts after
    /// each improvement, a zero stagnation budget disables the descent.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
