//! Property tests on random feasible instances.

use std::time::Duration;

use proptest::prelude::*;
use u_oproute::construction::build_initial_solution;
use u_oproute::model::{route_cost, Cost, CostTables, Route};
use u_oproute::moves::{improve_route, swap, swap_available, transfer, transfer_available, IntraConfig};
use u_oproute::random::create_rng;
use u_oproute::search::Budget;
use u_oproute::tabu::{TabuConfig, TabuRunner};

prop_compose! {
    /// Tasks on a 20x20 grid; task `i` is always eligible for operator `i % ops`.
    fn instance()
    (n in 1usize..14, ops in 1usize..5)
    (
     coords in prop::collection::vec((0u64..20, 0u64..20), n),
     extra in prop::collection::vec(prop::collection::vec(any::<bool>(), ops), n),
     start in prop::collection::vec(0u64..30, n),
     service in prop::collection::vec(1u64..10, n),
     ops in Just(ops),
    ) -> CostTables {
        let distance: Vec<Vec<Cost>> = coords
            .iter()
            .map(|a| coords.iter().map(|b| a.0.abs_diff(b.0) + a.1.abs_diff(b.1)).collect())
            .collect();
        let eligibility = extra
            .iter()
            .enumerate()
            .map(|(i, row)| row.iter().enumerate().map(|(o, &e)| e || o == i % ops).collect())
            .collect();
        CostTables::new(eligibility, distance, start, service).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn builder_covers_every_task_once(tables in instance(), seed in 0u64..1000) {
        let mut rng = create_rng(seed);
        let solution = build_initial_solution(&tables, &mut rng).unwrap();

        prop_assert!(solution.check(&tables).is_empty());
        prop_assert_eq!(solution.num_routes(), tables.num_operators());
        let assigned: usize = solution.routes().iter().map(Route::len).sum();
        prop_assert_eq!(assigned, tables.num_tasks());
    }

    #[test]
    fn route_cost_is_idempotent(tables in instance(), seed in 0u64..1000) {
        let mut rng = create_rng(seed);
        let solution = build_initial_solution(&tables, &mut rng).unwrap();
        for route in solution.routes() {
            let first = route_cost(route.tasks(), &tables);
            prop_assert_eq!(first, route_cost(route.tasks(), &tables));
            prop_assert_eq!(first, route.cost());
        }
    }

    #[test]
    fn intra_descent_never_worsens(tables in instance(), seed in 0u64..1000) {
        let mut rng = create_rng(seed);
        let mut solution = build_initial_solution(&tables, &mut rng).unwrap();
        let before: Vec<Cost> = solution.routes().iter().map(Route::cost).collect();
        for op in 0..solution.num_routes() {
            improve_route(solution.route_mut(op), &tables, &IntraConfig::default(), &mut rng);
        }
        for (route, old) in solution.routes().iter().zip(before) {
            prop_assert!(route.cost() <= old);
        }
        prop_assert!(solution.check(&tables).is_empty());
    }

    #[test]
    fn transfer_keeps_solution_valid(tables in instance(), seed in 0u64..1000) {
        let mut rng = create_rng(seed);
        let solution = build_initial_solution(&tables, &mut rng).unwrap();
        prop_assume!(transfer_available(&solution, &tables));

        let snapshot = solution.clone();
        let candidate = transfer(&solution, &tables, &IntraConfig::default(), &mut rng).unwrap();

        prop_assert_eq!(&solution, &snapshot);
        prop_assert!(candidate.solution.check(&tables).is_empty());
        prop_assert_eq!(candidate.makespan, candidate.solution.makespan());
        prop_assert_eq!(candidate.mv.source, solution.max_cost_route());
        prop_assert!(!candidate.solution.route(candidate.mv.source).contains(candidate.mv.task));
    }

    #[test]
    fn swap_keeps_solution_valid(tables in instance(), seed in 0u64..1000) {
        let mut rng = create_rng(seed);
        let solution = build_initial_solution(&tables, &mut rng).unwrap();
        prop_assume!(swap_available(&solution, &tables));

        let candidate = swap(&solution, &tables, &IntraConfig::default(), &mut rng).unwrap();

        prop_assert!(candidate.solution.check(&tables).is_empty());
        let (task1, route1) = candidate.mv.first;
        let (task2, route2) = candidate.mv.second;
        prop_assert!(candidate.solution.route(route2).contains(task1));
        prop_assert!(candidate.solution.route(route1).contains(task2));
    }

    #[test]
    fn tabu_never_returns_worse_than_start(tables in instance(), seed in 0u64..1000) {
        let mut rng = create_rng(seed);
        let initial = build_initial_solution(&tables, &mut rng).unwrap();
        let start = initial.makespan();
        let budget = Budget::new(Duration::from_secs(30)).with_max_rounds(4);

        let result = TabuRunner::run(&tables, initial, &TabuConfig::default(), &budget, &mut rng).unwrap();

        prop_assert!(result.best_makespan <= start);
        prop_assert_eq!(result.best.makespan(), result.best_makespan);
        prop_assert!(result.best.check(&tables).is_empty());
    }
}
