//! Full assignment of tasks to operator routes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::route::Route;
use super::tables::CostTables;
use super::Cost;

/// One route per operator, indexed by operator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    routes: Vec<Route>,
}

/// A broken solution invariant, reported by [`Solution::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A task appears in no route.
    Missing { task: usize },
    /// A task appears more than once across all routes.
    Duplicated { task: usize },
    /// A route holds an index outside `0..T`.
    UnknownTask { route: usize, task: usize },
    /// A route holds a task its operator cannot perform.
    Ineligible { route: usize, task: usize },
    /// A route's cached cost differs from its evaluation.
    CostDrift {
        route: usize,
        cached: Cost,
        actual: Cost,
    },
    /// The route count differs from the operator count.
    RouteCount { expected: usize, actual: usize },
}

impl Solution {
    /// `operators` empty routes.
    pub fn empty(operators: usize) -> Self {
        Self {
            routes: vec![Route::new(); operators],
        }
    }

    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, operator: usize) -> &Route {
        &self.routes[operator]
    }

    pub fn route_mut(&mut self, operator: usize) -> &mut Route {
        &mut self.routes[operator]
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Index of the first route attaining the maximum cost.
    pub fn max_cost_route(&self) -> usize {
        let mut best = 0;
        for (i, route) in self.routes.iter().enumerate() {
            if route.cost() > self.routes[best].cost() {
                best = i;
            }
        }
        best
    }

    /// Maximum route cost (Cmax).
    pub fn makespan(&self) -> Cost {
        self.routes.iter().map(Route::cost).max().unwrap_or(0)
    }

    /// Operator holding each task, or `None` for unassigned indices.
    pub fn assignment(&self, tasks: usize) -> Vec<Option<usize>> {
        let mut holder = vec![None; tasks];
        for (op, route) in self.routes.iter().enumerate() {
            for &task in route.tasks() {
                if let Some(slot) = holder.get_mut(task) {
                    *slot = Some(op);
                }
            }
        }
        holder
    }

    /// Verifies coverage, eligibility and cost consistency.
    ///
    /// Returns every violation found; an empty list means the solution is
    /// valid for `tables`.
    pub fn check(&self, tables: &CostTables) -> Vec<Violation> {
        let mut violations = Vec::new();
        let n = tables.num_tasks();

        if self.routes.len() != tables.num_operators() {
            violations.push(Violation::RouteCount {
                expected: tables.num_operators(),
                actual: self.routes.len(),
            });
        }

        let mut seen = vec![0usize; n];
        for (op, route) in self.routes.iter().enumerate() {
            for &task in route.tasks() {
                if task >= n {
                    violations.push(Violation::UnknownTask { route: op, task });
                    continue;
                }
                seen[task] += 1;
                if op < tables.num_operators() && !tables.is_eligible(task, op) {
                    violations.push(Violation::Ineligible { route: op, task });
                }
            }
            if route.tasks().iter().all(|&t| t < n) {
                let actual = route.recompute(tables);
                if actual != route.cost() {
                    violations.push(Violation::CostDrift {
                        route: op,
                        cached: route.cost(),
                        actual,
                    });
                }
            }
        }

        for (task, &count) in seen.iter().enumerate() {
            match count {
                0 => violations.push(Violation::Missing { task }),
                1 => {}
                _ => violations.push(Violation::Duplicated { task }),
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> CostTables {
        CostTables::new(
            vec![vec![true, true], vec![true, false], vec![true, true]],
            vec![vec![0, 2, 3], vec![2, 0, 4], vec![3, 4, 0]],
            vec![1, 1, 1],
            vec![1, 1, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_makespan_and_first_max_route() {
        let t = tables();
        let sol = Solution::from_routes(vec![
            Route::from_tasks(vec![1], &t),
            Route::from_tasks(vec![0], &t),
        ]);
        // both routes cost 2: the first index wins
        assert_eq!(sol.makespan(), 2);
        assert_eq!(sol.max_cost_route(), 0);
    }

    #[test]
    fn test_max_route_of_all_empty_is_zero() {
        let sol = Solution::empty(3);
        assert_eq!(sol.max_cost_route(), 0);
        assert_eq!(sol.makespan(), 0);
    }

    #[test]
    fn test_valid_solution_has_no_violations() {
        let t = tables();
        let sol = Solution::from_routes(vec![
            Route::from_tasks(vec![1, 0], &t),
            Route::from_tasks(vec![2], &t),
        ]);
        assert!(sol.check(&t).is_empty());
        assert_eq!(sol.assignment(3), vec![Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn test_check_reports_each_violation() {
        let t = tables();
        let sol = Solution::from_routes(vec![
            Route::from_tasks(vec![0], &t),
            Route::from_tasks(vec![1, 0], &t),
        ]);
        let violations = sol.check(&t);
        assert!(violations.contains(&Violation::Missing { task: 2 }));
        assert!(violations.contains(&Violation::Duplicated { task: 0 }));
        assert!(violations.contains(&Violation::Ineligible { route: 1, task: 1 }));
    }

    #[test]
    fn test_check_detects_cost_drift() {
        let t = tables();
        let mut route = Route::new();
        route.push_with_cost(0, 99);
        let sol = Solution::from_routes(vec![route, Route::from_tasks(vec![1, 2], &t)]);
        assert!(sol
            .check(&t)
            .iter()
            .any(|v| matches!(v, Violation::CostDrift { route: 0, cached: 99, .. })));
    }
}
