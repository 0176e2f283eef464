//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a feasible solution (trial = best = initial)
//! 2. Alternate phases TRANSFER → SWAP → TRANSFER → … until the budget runs out
//! 3. Within a phase, repeat pool rounds until `max_no_improve` consecutive
//!    rounds fail to improve the best-known makespan:
//!    a. Generate a pool of candidate moves from the trial solution
//!    b. Sort the pool by makespan (ties keep generation order)
//!    c. Accept the first candidate that is not tabu, or that beats the
//!       best-known makespan (aspiration)
//!    d. Record its move in the phase's tabu list and make it the trial solution
//! 4. Return the best-known solution
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.

use rand::Rng;
use tracing::debug;

use super::config::TabuConfig;
use super::types::TabuList;
use crate::error::OprResult;
use crate::moves::{swap, transfer, Candidate, Phase};
use crate::model::{CostTables, Solution};
use crate::search::{Budget, SearchResult, SearchState};

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Improves `initial` until `budget` is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates `InfeasibleInput` from the move generators. Phases whose
    /// move is unavailable for the trial solution are skipped, so this only
    /// happens for inconsistent tables.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call [`TabuConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<R: Rng>(
        tables: &CostTables,
        initial: Solution,
        config: &TabuConfig,
        budget: &Budget,
        rng: &mut R,
    ) -> OprResult<SearchResult> {
        config.validate().expect("invalid TabuConfig");

        let mut state = SearchState::new(initial);
        let mut transfer_tabu = TabuList::new(config.transfer_tenure, config.eviction);
        let mut swap_tabu = TabuList::new(config.swap_tenure, config.eviction);

        let mut phase = Phase::Transfer;
        let mut rounds = 0;
        let mut blocked = 0;
        let mut stalled = false;

        while !budget.exhausted(rounds) {
            if !phase.available(&state.current, tables) {
                blocked += 1;
                if blocked >= 2 {
                    stalled = true;
                    break;
                }
                phase = phase.next();
                continue;
            }
            blocked = 0;

            let accepted = match phase {
                Phase::Transfer => run_phase(
                    &mut state,
                    &mut transfer_tabu,
                    config.transfer_pool_size,
                    config.max_no_improve_transfer,
                    config.aspiration,
                    |s: &Solution, rng: &mut R| transfer(s, tables, &config.intra, rng),
                    |s: &Solution| phase.available(s, tables),
                    rng,
                )?,
                Phase::Swap => run_phase(
                    &mut state,
                    &mut swap_tabu,
                    config.swap_pool_size,
                    config.max_no_improve_swap,
                    config.aspiration,
                    |s: &Solution, rng: &mut R| swap(s, tables, &config.intra, rng),
                    |s: &Solution| phase.available(s, tables),
                    rng,
                )?,
            };

            debug!(
                %phase,
                round = rounds,
                accepted,
                best = state.best_makespan,
                elapsed_ms = budget.elapsed().as_millis() as u64,
                "tabu phase finished"
            );

            rounds += 1;
            phase = phase.next();
        }

        Ok(state.finish(rounds, budget.is_cancelled(), stalled))
    }
}

/// Runs pool rounds of one phase. Returns the number of accepted moves.
#[allow(clippy::too_many_arguments)]
fn run_phase<M, R, G, A>(
    state: &mut SearchState,
    tabu: &mut TabuList<M>,
    pool_size: usize,
    max_no_improve: usize,
    aspiration: bool,
    mut generate: G,
    available: A,
    rng: &mut R,
) -> OprResult<usize>
where
    M: PartialEq,
    R: Rng,
    G: FnMut(&Solution, &mut R) -> OprResult<Candidate<M>>,
    A: Fn(&Solution) -> bool,
{
    let mut no_improve = 0;
    let mut accepted = 0;

    while no_improve < max_no_improve {
        if !available(&state.current) {
            break;
        }

        let mut pool = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            pool.push(generate(&state.current, rng)?);
        }
        pool.sort_by_key(|c| c.makespan);

        let best_makespan = state.best_makespan;
        let chosen = pool.into_iter().find(|c| {
            (aspiration && c.makespan < best_makespan) || !tabu.contains(&c.mv)
        });

        match chosen {
            Some(candidate) => {
                tabu.insert(candidate.mv);
                accepted += 1;
                if state.accept(candidate.solution, candidate.makespan) {
                    no_improve = 0;
                } else {
                    no_improve += 1;
                }
            }
            // every candidate tabu and none aspirating
            None => no_improve += 1,
        }
    }

    Ok(accepted)
}
