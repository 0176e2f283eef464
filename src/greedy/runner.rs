//! Greedy alternation loop.

use rand::Rng;
use tracing::trace;

use super::config::GreedyConfig;
use crate::error::OprResult;
use crate::moves::{improve_route, Phase};
use crate::model::{CostTables, Solution};
use crate::search::{Budget, SearchResult, SearchState};

/// Executes the greedy random-alternation controller.
pub struct GreedyRunner;

impl GreedyRunner {
    /// Improves `initial` until `budget` is exhausted; one round is one move.
    ///
    /// The best-known solution starts as `initial` with every route passed
    /// through the intra-route descent, while the walk itself starts from
    /// `initial` unchanged.
    pub fn run<R: Rng>(
        tables: &CostTables,
        initial: Solution,
        config: &GreedyConfig,
        budget: &Budget,
        rng: &mut R,
    ) -> OprResult<SearchResult> {
        let mut polished = initial.clone();
        for op in 0..polished.num_routes() {
            improve_route(polished.route_mut(op), tables, &config.intra, rng);
        }
        let mut state = SearchState::new(initial).with_best(polished);

        let mut phase = config.first_phase;
        let mut improvements = 0;
        let mut rounds = 0;
        let mut stalled = false;

        while !budget.exhausted(rounds) {
            let step_phase = if phase.available(&state.current, tables) {
                phase
            } else if phase.next().available(&state.current, tables) {
                phase.next()
            } else {
                stalled = true;
                break;
            };

            let next = step_phase.neighbor(&state.current, tables, &config.intra, rng)?;
            let makespan = next.makespan();
            if state.accept(next, makespan) {
                improvements += 1;
                trace!(round = rounds, best = makespan, "greedy improvement");
            }

            phase = if rng.random_bool(0.5) {
                Phase::Transfer
            } else {
                Phase::Swap
            };

            if improvements > config.revert_after {
                state.restore_best();
                improvements = 0;
            }
            rounds += 1;
        }

        Ok(state.finish(rounds, budget.is_cancelled(), stalled))
    }
}
