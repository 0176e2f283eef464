//! Operator routes and the route cost evaluator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::tables::CostTables;
use super::Cost;

/// Total cost of visiting `tasks` in order from the start room.
///
/// `start_distance[t0] + service[t0] + Σ (distance[ti][ti+1] + service[ti+1])`,
/// and 0 for an empty sequence. The sum saturates at `Cost::MAX`.
pub fn route_cost(tasks: &[usize], tables: &CostTables) -> Cost {
    let Some(&first) = tasks.first() else {
        return 0;
    };
    let head = tables
        .start_distance(first)
        .saturating_add(tables.service_time(first));
    tasks.windows(2).fold(head, |acc, pair| {
        acc.saturating_add(tables.distance(pair[0], pair[1]))
            .saturating_add(tables.service_time(pair[1]))
    })
}

/// A stop on a route: the shared start room or a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stop {
    Start,
    Task(usize),
}

/// One operator's ordered tasks and their total cost.
///
/// The start room is implicit before the first task. The cost is private and
/// recomputed by every mutating method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    tasks: Vec<usize>,
    cost: Cost,
}

impl Route {
    /// An empty route (start room only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a route from an ordered task list.
    pub fn from_tasks(tasks: Vec<usize>, tables: &CostTables) -> Self {
        let cost = route_cost(&tasks, tables);
        Self { tasks, cost }
    }

    pub fn tasks(&self) -> &[usize] {
        &self.tasks
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn last(&self) -> Option<usize> {
        self.tasks.last().copied()
    }

    pub fn contains(&self, task: usize) -> bool {
        self.tasks.contains(&task)
    }

    pub fn position(&self, task: usize) -> Option<usize> {
        self.tasks.iter().position(|&t| t == task)
    }

    /// The start room followed by every task.
    pub fn stops(&self) -> impl Iterator<Item = Stop> + '_ {
        std::iter::once(Stop::Start).chain(self.tasks.iter().map(|&t| Stop::Task(t)))
    }

    /// Fresh evaluation of the route, independent of the cached cost.
    pub fn recompute(&self, tables: &CostTables) -> Cost {
        route_cost(&self.tasks, tables)
    }

    /// Appends `task` at the end of the route.
    pub fn push(&mut self, task: usize, tables: &CostTables) {
        self.tasks.push(task);
        self.cost = route_cost(&self.tasks, tables);
    }

    /// Removes and returns the task at `position`.
    pub fn remove_at(&mut self, position: usize, tables: &CostTables) -> usize {
        let task = self.tasks.remove(position);
        self.cost = route_cost(&self.tasks, tables);
        task
    }

    /// Removes `task` if present, returning whether it was found.
    pub fn remove_task(&mut self, task: usize, tables: &CostTables) -> bool {
        match self.position(task) {
            Some(pos) => {
                self.remove_at(pos, tables);
                true
            }
            None => false,
        }
    }

    /// Exchanges the tasks at positions `a` and `b`.
    pub fn swap_positions(&mut self, a: usize, b: usize, tables: &CostTables) {
        self.tasks.swap(a, b);
        self.cost = route_cost(&self.tasks, tables);
    }

    /// Appends `task` and sets the cost to `cost` without re-evaluating.
    ///
    /// Only for callers that carry an exact running total; the initial
    /// solution builder is the one user.
    pub(crate) fn push_with_cost(&mut self, task: usize, cost: Cost) {
        self.tasks.push(task);
        self.cost = cost;
    }
}
