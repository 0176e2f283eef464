//! Read-only cost and eligibility tables.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::record::{Operator, Task};
use super::Cost;
use crate::error::{Infeasibility, OprResult};

/// Precomputed tables shared by every trial of a run.
///
/// - `eligibility[t][o]`: operator `o` can perform task `t`
/// - `distance[a][b]`: minimum travel time between the rooms of tasks `a` and `b`
/// - `start_distance[t]`: travel time from the start room to task `t`
/// - `service_time[t]`: time spent performing task `t`
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostTables {
    eligibility: Vec<Vec<bool>>,
    eligible: Vec<Vec<usize>>,
    distance: Vec<Vec<Cost>>,
    start_distance: Vec<Cost>,
    service_time: Vec<Cost>,
}

impl CostTables {
    /// Validates table shapes and builds the tables.
    ///
    /// A task with no eligible operator is accepted here and rejected by
    /// [`crate::construction::build_initial_solution`].
    pub fn new(
        eligibility: Vec<Vec<bool>>,
        distance: Vec<Vec<Cost>>,
        start_distance: Vec<Cost>,
        service_time: Vec<Cost>,
    ) -> OprResult<Self> {
        let tasks = eligibility.len();
        if tasks == 0 {
            return Err(Infeasibility::NoTasks.into());
        }
        let operators = eligibility[0].len();
        if operators == 0 {
            return Err(Infeasibility::NoOperators.into());
        }

        for row in &eligibility {
            check_len("eligibility row", operators, row.len())?;
        }
        check_len("distance", tasks, distance.len())?;
        for row in &distance {
            check_len("distance row", tasks, row.len())?;
        }
        check_len("start_distance", tasks, start_distance.len())?;
        check_len("service_time", tasks, service_time.len())?;

        let eligible = eligibility
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(o, &ok)| ok.then_some(o))
                    .collect()
            })
            .collect();

        Ok(Self {
            eligibility,
            eligible,
            distance,
            start_distance,
            service_time,
        })
    }

    /// Builds tables from resolved records.
    ///
    /// Eligibility comes from skill matching and service times from the task
    /// records. `distance` and `start_distance` are indexed like `tasks`.
    pub fn from_records(
        tasks: &[Task],
        operators: &[Operator],
        distance: Vec<Vec<Cost>>,
        start_distance: Vec<Cost>,
    ) -> OprResult<Self> {
        let eligibility = tasks
            .iter()
            .map(|task| operators.iter().map(|op| op.can_perform(task)).collect())
            .collect();
        let service_time = tasks.iter().map(|t| t.service_time).collect();

        Self::new(eligibility, distance, start_distance, service_time)
    }

    pub fn num_tasks(&self) -> usize {
        self.eligibility.len()
    }

    pub fn num_operators(&self) -> usize {
        self.eligibility[0].len()
    }

    #[inline]
    pub fn is_eligible(&self, task: usize, operator: usize) -> bool {
        self.eligibility[task][operator]
    }

    /// Operators able to perform `task`, in increasing index order.
    #[inline]
    pub fn eligible_operators(&self, task: usize) -> &[usize] {
        &self.eligible[task]
    }

    /// Number of operators able to perform `task` (its scarcity tier).
    #[inline]
    pub fn eligible_count(&self, task: usize) -> usize {
        self.eligible[task].len()
    }

    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> Cost {
        self.distance[from][to]
    }

    #[inline]
    pub fn start_distance(&self, task: usize) -> Cost {
        self.start_distance[task]
    }

    #[inline]
    pub fn service_time(&self, task: usize) -> Cost {
        self.service_time[task]
    }

    /// The full task-to-task distance matrix.
    pub fn distance_matrix(&self) -> &[Vec<Cost>] {
        &self.distance
    }
}

fn check_len(table: &'static str, expected: usize, actual: usize) -> OprResult<()> {
    if expected != actual {
        return Err(Infeasibility::DimensionMismatch {
            table,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}
