//! SA execution loop.

use rand::Rng;
use tracing::debug;

use super::config::SaConfig;
use crate::error::OprResult;
use crate::moves::Phase;
use crate::model::{Cost, CostTables, Solution};
use crate::search::{Budget, SearchResult, SearchState};

/// Executes the simulated annealing controller.
pub struct SaRunner;

impl SaRunner {
    /// Improves `initial` until `budget` is exhausted.
    ///
    /// Each outer step evaluates `iterations_per_temperature` candidates of
    /// one phase (transfer and swap alternate between steps), then cools the
    /// temperature. The budget is checked between steps.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn run<R: Rng>(
        tables: &CostTables,
        initial: Solution,
        config: &SaConfig,
        budget: &Budget,
        rng: &mut R,
    ) -> OprResult<SearchResult> {
        config.validate().expect("invalid SaConfig");

        let mut state = SearchState::new(initial);
        let mut temperature = config.initial_temperature_ratio * state.best_makespan as f64;
        let mut phase = Phase::Transfer;
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

            for _ in 0..config.iterations_per_temperature {
                if !step_phase.available(&state.current, tables) {
                    break;
                }
                let candidate = step_phase.neighbor(&state.current, tables, &config.intra, rng)?;
                let makespan = candidate.makespan();

                if metropolis(state.current_makespan, makespan, temperature, rng) {
                    state.accept(candidate, makespan);
                }
            }

            debug!(
                phase = %step_phase,
                round = rounds,
                temperature,
                current = state.current_makespan,
                best = state.best_makespan,
                "annealing step finished"
            );

            phase = step_phase.next();
            temperature = config.cooling.cool(temperature);
            rounds += 1;
        }

        Ok(state.finish(rounds, budget.is_cancelled(), stalled))
    }
}

/// Metropolis acceptance: improvements always, others with probability
/// `exp((current - candidate) / temperature)`.
fn metropolis<R: Rng>(current: Cost, candidate: Cost, temperature: f64, rng: &mut R) -> bool {
    if candidate < current {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    let delta = current as f64 - candidate as f64;
    rng.random_range(0.0..1.0) < (delta / temperature).exp()
}
