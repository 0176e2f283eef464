//! Tabu Search configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::TabuEviction;
use crate::moves::IntraConfig;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_oproute::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_transfer_pool_size(20)
///     .with_transfer_tenure(12)
///     .with_aspiration(true);
/// assert_eq!(config.transfer_pool_size, 20);
/// assert_eq!(config.transfer_tenure, 12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TabuConfig {
    /// Transfer candidates generated per pool round.
    pub transfer_pool_size: usize,
    /// Swap candidates generated per pool round.
    pub swap_pool_size: usize,
    /// Capacity of the transfer tabu list.
    pub transfer_tenure: usize,
    /// Capacity of the swap tabu list.
    pub swap_tenure: usize,
    /// Consecutive non-improving rounds that end a transfer phase.
    pub max_no_improve_transfer: usize,
    /// Consecutive non-improving rounds that end a swap phase.
    pub max_no_improve_swap: usize,
    /// Whether a tabu move that beats the best-known makespan is accepted anyway.
    pub aspiration: bool,
    /// How full tabu lists make room for new entries.
    pub eviction: TabuEviction,
    /// Intra-route descent applied inside each move.
    pub intra: IntraConfig,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            transfer_pool_size: 10,
            swap_pool_size: 10,
            transfer_tenure: 8,
            swap_tenure: 8,
            max_no_improve_transfer: 5,
            max_no_improve_swap: 5,
            aspiration: true,
            eviction: TabuEviction::default(),
            intra: IntraConfig::default(),
        }
    }
}

impl TabuConfig {
    pub fn with_transfer_pool_size(mut self, n: usize) -> Self {
        self.transfer_pool_size = n;
        self
    }

    pub fn with_swap_pool_size(mut self, n: usize) -> Self {
        self.swap_pool_size = n;
        self
    }

    pub fn with_transfer_tenure(mut self, n: usize) -> Self {
        self.transfer_tenure = n;
        self
    }

    pub fn with_swap_tenure(mut self, n: usize) -> Self {
        self.swap_tenure = n;
        self
    }

    pub fn with_max_no_improve_transfer(mut self, n: usize) -> Self {
        self.max_no_improve_transfer = n;
        self
    }

    pub fn with_max_no_improve_swap(mut self, n: usize) -> Self {
        self.max_no_improve_swap = n;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_eviction(mut self, eviction: TabuEviction) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn with_intra(mut self, intra: IntraConfig) -> Self {
        self.intra = intra;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.transfer_pool_size == 0 || self.swap_pool_size == 0 {
            return Err("pool sizes must be at least 1".into());
        }
        if self.max_no_improve_transfer == 0 || self.max_no_improve_swap == 0 {
            return Err("phase stagnation budgets must be at least 1".into());
        }
        Ok(())
    }
}
