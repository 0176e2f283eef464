//! Swap move: exchange a Cmax-route task with a task of another route.

use rand::Rng;

use super::intra::{improve_route, IntraConfig};
use super::{Candidate, Phase, SwapMove};
use crate::error::{Infeasibility, OprResult};
use crate::model::{CostTables, Solution};

/// `(task2, holder)` pairs that can trade places with `task1` of route `max_route`.
///
/// `task2` must sit outside the Cmax route, be eligible for its operator, and
/// its holder must be eligible for `task1`.
fn partners(
    holders: &[Option<usize>],
    tables: &CostTables,
    max_route: usize,
    task1: usize,
) -> Vec<(usize, usize)> {
    holders
        .iter()
        .enumerate()
        .filter_map(|(task2, holder)| holder.map(|h| (task2, h)))
        .filter(|&(task2, holder)| {
            holder != max_route
                && tables.is_eligible(task2, max_route)
                && tables.is_eligible(task1, holder)
        })
        .collect()
}

/// Cmax-route tasks with at least one partner, each with its partners.
type SwapOptions = Vec<(usize, Vec<(usize, usize)>)>;

fn swappable(solution: &Solution, tables: &CostTables) -> (usize, SwapOptions) {
    let max_route = solution.max_cost_route();
    let holders = solution.assignment(tables.num_tasks());
    let options = solution
        .route(max_route)
        .tasks()
        .iter()
        .map(|&task1| (task1, partners(&holders, tables, max_route, task1)))
        .filter(|(_, p)| !p.is_empty())
        .collect();
    (max_route, options)
}

/// Whether [`swap`] can be generated from `solution`.
pub fn swap_available(solution: &Solution, tables: &CostTables) -> bool {
    !swappable(solution, tables).1.is_empty()
}

/// Generates a swap neighbor of `solution`.
///
/// `task1` is drawn from the Cmax-route tasks that have a partner, `task2`
/// from those partners: tasks outside the Cmax route that its operator can
/// perform and whose holder can perform `task1`. Each task is removed from
/// its route and appended to the other's, and both routes are reordered by
/// [`improve_route`]. The input is left untouched.
///
/// # Errors
///
/// `InfeasibleInput` when no Cmax-route task has a swap partner.
pub fn swap<R: Rng>(
    solution: &Solution,
    tables: &CostTables,
    intra: &IntraConfig,
    rng: &mut R,
) -> OprResult<Candidate<SwapMove>> {
    let (max_route, options) = swappable(solution, tables);
    if options.is_empty() {
        return Err(Infeasibility::MoveUnavailable {
            phase: Phase::Swap,
            route: max_route,
        }
        .into());
    }

    let (task1, choices) = &options[rng.random_range(0..options.len())];
    let (task2, holder) = choices[rng.random_range(0..choices.len())];
    let task1 = *task1;

    let mut next = solution.clone();
    next.route_mut(max_route).remove_task(task1, tables);
    next.route_mut(holder).remove_task(task2, tables);
    next.route_mut(max_route).push(task2, tables);
    next.route_mut(holder).push(task1, tables);
    improve_route(next.route_mut(max_route), tables, intra, rng);
    improve_route(next.route_mut(holder), tables, intra, rng);

    Ok(Candidate::new(
        next,
        SwapMove {
            first: (task1, max_route),
            second: (task2, holder),
        },
    ))
}
