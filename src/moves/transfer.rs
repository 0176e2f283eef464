//! Transfer move: relocate one task from the Cmax route to another operator.

use rand::Rng;

use super::intra::{improve_route, IntraConfig};
use super::{Candidate, Phase, TransferMove};
use crate::error::{Infeasibility, OprResult};
use crate::model::{CostTables, Solution};

/// Positions in the Cmax route whose task some other operator can perform.
fn movable_positions(solution: &Solution, tables: &CostTables, source: usize) -> Vec<usize> {
    solution
        .route(source)
        .tasks()
        .iter()
        .enumerate()
        .filter(|&(_, &task)| {
            tables
                .eligible_operators(task)
                .iter()
                .any(|&op| op != source)
        })
        .map(|(pos, _)| pos)
        .collect()
}

/// Whether [`transfer`] can be generated from `solution`.
pub fn transfer_available(solution: &Solution, tables: &CostTables) -> bool {
    let source = solution.max_cost_route();
    !movable_positions(solution, tables, source).is_empty()
}

/// Generates a transfer neighbor of `solution`.
///
/// A random movable task leaves the Cmax route (first route attaining the
/// makespan) and is appended to a uniformly chosen other eligible operator.
/// Both changed routes are then reordered by [`improve_route`]. The input is
/// left untouched.
///
/// # Errors
///
/// `InfeasibleInput` when the Cmax route has no task another operator can take.
pub fn transfer<R: Rng>(
    solution: &Solution,
    tables: &CostTables,
    intra: &IntraConfig,
    rng: &mut R,
) -> OprResult<Candidate<TransferMove>> {
    let source = solution.max_cost_route();
    let positions = movable_positions(solution, tables, source);
    if positions.is_empty() {
        return Err(Infeasibility::MoveUnavailable {
            phase: Phase::Transfer,
            route: source,
        }
        .into());
    }

    let mut next = solution.clone();
    let position = positions[rng.random_range(0..positions.len())];
    let task = next.route_mut(source).remove_at(position, tables);
    improve_route(next.route_mut(source), tables, intra, rng);

    let destinations: Vec<usize> = tables
        .eligible_operators(task)
        .iter()
        .copied()
        .filter(|&op| op != source)
        .collect();
    let destination = destinations[rng.random_range(0..destinations.len())];
    next.route_mut(destination).push(task, tables);
    improve_route(next.route_mut(destination), tables, intra, rng);

    Ok(Candidate::new(next, TransferMove { task, source }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OprError;
    use crate::model::Route;
    use crate::random::create_rng;

    /// Route A (operator 0) holds tasks 0 and 1, route B (operator 1) holds
    /// task 2. Task 1 sits far from everything on A's side.
    fn two_route_problem() -> (CostTables, Solution) {
        let tables = CostTables::new(
            vec![vec![true, false], vec![true, true], vec![false, true]],
            vec![vec![0, 40, 50], vec![40, 0, 20], vec![50, 20, 0]],
            vec![20, 10, 5],
            vec![20, 20, 5],
        )
        .unwrap();
        let solution = Solution::from_routes(vec![
            Route::from_tasks(vec![0, 1], &tables),
            Route::from_tasks(vec![2], &tables),
        ]);
        (tables, solution)
    }

    #[test]
    fn test_transfer_reduces_makespan() {
        let (tables, solution) = two_route_problem();
        // A: 20 + 20 + 40 + 20 = 100, B: 5 + 5 = 10
        assert_eq!(solution.route(0).cost(), 100);
        assert_eq!(solution.route(1).cost(), 10);

        let mut rng = create_rng(42);
        let candidate = transfer(&solution, &tables, &IntraConfig::default(), &mut rng).unwrap();

        // Only task 1 is movable. A drops to 40; B becomes [2, 1] = 10 + 20 + 20 = 50
        // or [1, 2] = 30 + 20 + 5 = 55, and the descent keeps the cheaper order.
        assert_eq!(candidate.mv, TransferMove { task: 1, source: 0 });
        assert_eq!(candidate.solution.route(0).tasks(), &[0]);
        assert_eq!(candidate.solution.route(0).cost(), 40);
        assert_eq!(candidate.solution.route(1).cost(), 50);
        assert_eq!(candidate.makespan, 50);
        assert!(candidate.makespan < solution.makespan());
    }

    #[test]
    fn test_input_solution_untouched() {
        let (tables, solution) = two_route_problem();
        let snapshot = solution.clone();
        let mut rng = create_rng(42);
        let _ = transfer(&solution, &tables, &IntraConfig::default(), &mut rng).unwrap();
        assert_eq!(solution, snapshot);
    }

    #[test]
    fn test_candidates_keep_invariants() {
        let (tables, solution) = two_route_problem();
        for seed in 0..10 {
            let mut rng = create_rng(seed);
            let candidate =
                transfer(&solution, &tables, &IntraConfig::default(), &mut rng).unwrap();
            assert!(candidate.solution.check(&tables).is_empty());
            assert_eq!(candidate.makespan, candidate.solution.makespan());
        }
    }

    #[test]
    fn test_locked_cmax_route_is_unavailable() {
        let tables = CostTables::new(
            vec![vec![true, false], vec![false, true]],
            vec![vec![0, 1], vec![1, 0]],
            vec![9, 1],
            vec![1, 1],
        )
        .unwrap();
        let solution = Solution::from_routes(vec![
            Route::from_tasks(vec![0], &tables),
            Route::from_tasks(vec![1], &tables),
        ]);
        assert!(!transfer_available(&solution, &tables));

        let mut rng = create_rng(42);
        let err = transfer(&solution, &tables, &IntraConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            OprError::InfeasibleInput(Infeasibility::MoveUnavailable {
                phase: Phase::Transfer,
                route: 0,
            })
        ));
    }
}
