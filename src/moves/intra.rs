//! Intra-route reordering by randomized pairwise-swap descent.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{CostTables, Route};

/// Configuration for the intra-route descent.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntraConfig {
    /// Consecutive non-improving swap trials before the descent stops.
    pub max_stagnation: usize,
}

impl Default for IntraConfig {
    fn default() -> Self {
        Self { max_stagnation: 10 }
    }
}

impl IntraConfig {
    pub fn with_max_stagnation(mut self, n: usize) -> Self {
        self.max_stagnation = n;
        self
    }
}

/// Improves `route` in place by swapping random task pairs.
///
/// A swap that lowers the cost is kept and resets the stagnation counter;
/// any other swap is undone. Routes with fewer than two tasks are left as is.
pub fn improve_route<R: Rng>(
    route: &mut Route,
    tables: &CostTables,
    config: &IntraConfig,
    rng: &mut R,
) {
    let n = route.len();
    if n < 2 {
        return;
    }

    let mut stagnation = 0;
    while stagnation < config.max_stagnation {
        let a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n - 1);
        if b >= a {
            b += 1;
        }

        let before = route.cost();
        route.swap_positions(a, b, tables);
        if route.cost() < before {
            stagnation = 0;
        } else {
            route.swap_positions(a, b, tables);
            stagnation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cost;
    use crate::random::create_rng;

    /// Tasks on a line; visiting them in index order is optimal.
    fn line(n: usize) -> CostTables {
        let distance: Vec<Vec<Cost>> = (0..n)
            .map(|i| (0..n).map(|j| (i as Cost).abs_diff(j as Cost) * 10).collect())
            .collect();
        CostTables::new(
            vec![vec![true]; n],
            distance,
            (0..n).map(|i| i as Cost * 10).collect(),
            vec![1; n],
        )
        .unwrap()
    }

    #[test]
    fn test_never_worsens() {
        let tables = line(6);
        let mut rng = create_rng(42);
        let mut route = Route::from_tasks(vec![5, 0, 3, 1, 4, 2], &tables);
        let before = route.cost();
        improve_route(&mut route, &tables, &IntraConfig::default(), &mut rng);
        assert!(route.cost() <= before);
        assert_eq!(route.cost(), route.recompute(&tables));

        let mut tasks = route.tasks().to_vec();
        tasks.sort_unstable();
        assert_eq!(tasks, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_fixes_reversed_pair() {
        let tables = line(2);
        let mut rng = create_rng(1);
        let mut route = Route::from_tasks(vec![1, 0], &tables);
        improve_route(&mut route, &tables, &IntraConfig::default(), &mut rng);
        assert_eq!(route.tasks(), &[0, 1]);
    }

    #[test]
    fn test_short_routes_untouched() {
        let tables = line(3);
        let mut rng = create_rng(42);

        let mut empty = Route::new();
        improve_route(&mut empty, &tables, &IntraConfig::default(), &mut rng);
        assert!(empty.is_empty());

        let mut single = Route::from_tasks(vec![2], &tables);
        improve_route(&mut single, &tables, &IntraConfig::default(), &mut rng);
        assert_eq!(single.tasks(), &[2]);
        assert_eq!(single.cost(), 21);
    }

    #[test]
    fn test_zero_stagnation_budget_is_noop() {
        let tables = line(4);
        let mut rng = create_rng(42);
        let mut route = Route::from_tasks(vec![3, 2, 1, 0], &tables);
        let config = IntraConfig::default().with_max_stagnation(0);
        improve_route(&mut route, &tables, &config, &mut rng);
        assert_eq!(route.tasks(), &[3, 2, 1, 0]);
    }
}
