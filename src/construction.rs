//! Initial solution construction.
//!
//! # Algorithm
//!
//! Tasks are assigned tier by tier, where tier `k` holds the tasks exactly
//! `k` operators can perform. Tasks only one operator can do are therefore
//! locked in before flexible ones compete for the remaining capacity.
//!
//! Within a tier, tasks are drawn uniformly at random without replacement.
//! Each drawn task goes to the eligible operator minimising
//! `accumulated cost + travel from the route end` (start room for an empty
//! route); exact ties keep the lowest operator index.

use rand::Rng;
use tracing::debug;

use crate::error::{Infeasibility, OprResult};
use crate::model::{Cost, CostTables, Solution};

/// Builds a feasible solution assigning every task to one eligible operator.
///
/// # Errors
///
/// `InfeasibleInput` with [`Infeasibility::NoEligibleOperator`] naming the
/// first task no operator can perform.
pub fn build_initial_solution<R: Rng>(tables: &CostTables, rng: &mut R) -> OprResult<Solution> {
    let operators = tables.num_operators();

    if let Some(task) = (0..tables.num_tasks()).find(|&t| tables.eligible_count(t) == 0) {
        return Err(Infeasibility::NoEligibleOperator { task }.into());
    }

    let mut solution = Solution::empty(operators);

    for tier in 1..=operators {
        let mut pending: Vec<usize> = (0..tables.num_tasks())
            .filter(|&t| tables.eligible_count(t) == tier)
            .collect();
        if pending.is_empty() {
            continue;
        }
        debug!(tier, tasks = pending.len(), "assigning scarcity tier");

        while !pending.is_empty() {
            let task = pending.swap_remove(rng.random_range(0..pending.len()));

            let mut chosen: Option<(usize, Cost)> = None;
            for &op in tables.eligible_operators(task) {
                let route = solution.route(op);
                let travel = match route.last() {
                    Some(last) => tables.distance(last, task),
                    None => tables.start_distance(task),
                };
                let cumulative = route.cost().saturating_add(travel);
                if chosen.is_none_or(|(_, best)| cumulative < best) {
                    chosen = Some((op, cumulative));
                }
            }

            if let Some((op, cumulative)) = chosen {
                // The running total already contains the operator's previous
                // cost, so this equals a full re-evaluation of the route.
                solution
                    .route_mut(op)
                    .push_with_cost(task, cumulative.saturating_add(tables.service_time(task)));
            }
        }
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OprError;
    use crate::random::create_rng;

    #[test]
    fn test_single_task_single_operator() {
        let tables = CostTables::new(vec![vec![true]], vec![vec![0]], vec![5], vec![3]).unwrap();
        let mut rng = create_rng(42);
        let sol = build_initial_solution(&tables, &mut rng).unwrap();

        assert_eq!(sol.route(0).tasks(), &[0]);
        assert_eq!(sol.route(0).cost(), 8);
        assert_eq!(sol.makespan(), 8);
    }

    #[test]
    fn test_two_flexible_tasks_all_assigned() {
        let tables = CostTables::new(
            vec![vec![true, true], vec![true, true]],
            vec![vec![0, 4], vec![4, 0]],
            vec![1, 1],
            vec![1, 1],
        )
        .unwrap();

        for seed in 0..20 {
            let mut rng = create_rng(seed);
            let sol = build_initial_solution(&tables, &mut rng).unwrap();
            let assigned: usize = sol.routes().iter().map(|r| r.len()).sum();
            assert_eq!(assigned, 2);
            assert!(sol.check(&tables).is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn test_tie_goes_to_lowest_operator() {
        // Both operators start empty with identical distances: the first
        // drawn task lands on operator 0, the second on operator 1 because
        // operator 0 now carries cost.
        let tables = CostTables::new(
            vec![vec![true, true], vec![true, true]],
            vec![vec![0, 4], vec![4, 0]],
            vec![1, 1],
            vec![1, 1],
        )
        .unwrap();
        let mut rng = create_rng(3);
        let sol = build_initial_solution(&tables, &mut rng).unwrap();
        assert_eq!(sol.route(0).len(), 1);
        assert_eq!(sol.route(1).len(), 1);
    }

    #[test]
    fn test_locked_tasks_go_to_their_only_operator() {
        let tables = CostTables::new(
            vec![
                vec![false, true, false],
                vec![true, true, true],
                vec![false, false, true],
                vec![true, false, false],
            ],
            vec![vec![0; 4]; 4],
            vec![2, 2, 2, 2],
            vec![1, 1, 1, 1],
        )
        .unwrap();
        let mut rng = create_rng(7);
        let sol = build_initial_solution(&tables, &mut rng).unwrap();

        assert!(sol.route(1).contains(0));
        assert!(sol.route(2).contains(2));
        assert!(sol.route(0).contains(3));
        assert!(sol.check(&tables).is_empty());
    }

    #[test]
    fn test_costs_match_evaluator_with_many_tasks_per_operator() {
        let n = 12;
        let distance: Vec<Vec<Cost>> = (0..n)
            .map(|i| (0..n).map(|j| (i as Cost).abs_diff(j as Cost) * 3).collect())
            .collect();
        let tables = CostTables::new(
            (0..n).map(|i| vec![true, i % 2 == 0]).collect(),
            distance,
            (0..n).map(|i| i as Cost + 1).collect(),
            (0..n).map(|i| (i % 4) as Cost + 2).collect(),
        )
        .unwrap();

        let mut rng = create_rng(11);
        let sol = build_initial_solution(&tables, &mut rng).unwrap();
        assert!(sol.check(&tables).is_empty());
    }

    #[test]
    fn test_extreme_costs_saturate_and_stay_consistent() {
        let tables = CostTables::new(
            vec![vec![true], vec![true], vec![true]],
            vec![vec![Cost::MAX; 3]; 3],
            vec![Cost::MAX / 2, Cost::MAX / 2, Cost::MAX / 2],
            vec![Cost::MAX / 2; 3],
        )
        .unwrap();
        let mut rng = create_rng(42);
        let sol = build_initial_solution(&tables, &mut rng).unwrap();

        assert_eq!(sol.makespan(), Cost::MAX);
        assert!(sol.check(&tables).is_empty());
    }

    #[test]
    fn test_task_without_operator_is_infeasible() {
        let tables = CostTables::new(
            vec![vec![true, false], vec![false, false]],
            vec![vec![0, 1], vec![1, 0]],
            vec![1, 1],
            vec![1, 1],
        )
        .unwrap();
        let mut rng = create_rng(42);
        let err = build_initial_solution(&tables, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            OprError::InfeasibleInput(Infeasibility::NoEligibleOperator { task: 1 })
        ));
    }
}
