//! Post-processing and persistence.
//!
//! [`Report`] turns a solution into the walked arcs and per-task timings of
//! every operator and writes them as two semicolon-separated sections.
//! [`RunLog`] appends one line per solve, and [`matrix`] caches the
//! task-to-task distance matrix between runs.

mod log;
pub mod matrix;
mod path;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use log::{RunLog, RunRecord};
pub use path::{Arc, DirectPaths, PathExpander};

use crate::error::{Infeasibility, OprError, OprResult};
use crate::model::{Cost, CostTables, Operator, Solution, Stop, Task, Violation};

const ARC_HEADER: [&str; 4] = ["OperatorID", "Room1", "Room2", "TravelTime"];
const TIMING_HEADER: [&str; 5] = ["OperatorID", "Task", "Room", "ServiceTime", "CumulativeTime"];

/// An arc walked by an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcRecord {
    pub operator: String,
    pub arc: Arc,
}

/// Completion time of a task on its operator's route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskTiming {
    pub operator: String,
    pub task: String,
    pub room: String,
    pub service_time: Cost,
    /// Time at which the task is finished, counted from the start room.
    pub cumulative_time: Cost,
}

/// Human-readable description of a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    arcs: Vec<ArcRecord>,
    timings: Vec<TaskTiming>,
}

impl Report {
    /// Builds the report of `solution`.
    ///
    /// `tasks` and `operators` are the records the tables were built from,
    /// indexed the same way. Cumulative times follow the route cost
    /// recurrence, so the last timing of a route equals its cost.
    ///
    /// # Errors
    ///
    /// `RecordMismatch` when the record counts disagree with the tables or
    /// the solution, or when the solution references tasks or operators the
    /// tables do not have.
    pub fn build<E: PathExpander>(
        solution: &Solution,
        tables: &CostTables,
        tasks: &[Task],
        operators: &[Operator],
        start_room: &str,
        expander: &E,
    ) -> OprResult<Self> {
        if tasks.len() != tables.num_tasks() {
            return Err(Infeasibility::RecordMismatch {
                detail: format!(
                    "{} task records for {} tasks in the tables",
                    tasks.len(),
                    tables.num_tasks()
                ),
            }
            .into());
        }
        if operators.len() != solution.num_routes() {
            return Err(Infeasibility::RecordMismatch {
                detail: format!(
                    "{} operator records for {} routes",
                    operators.len(),
                    solution.num_routes()
                ),
            }
            .into());
        }

        if let Some(violation) = solution.check(tables).into_iter().find(|v| {
            matches!(
                v,
                Violation::UnknownTask { .. } | Violation::RouteCount { .. }
            )
        }) {
            return Err(Infeasibility::RecordMismatch {
                detail: format!("solution does not fit the tables: {:?}", violation),
            }
            .into());
        }

        let mut report = Report::default();
        for (operator, route) in operators.iter().zip(solution.routes()) {
            let mut cumulative: Cost = 0;
            for (prev, &task) in route.stops().zip(route.tasks()) {
                let (from, travel) = match prev {
                    Stop::Start => (start_room, tables.start_distance(task)),
                    Stop::Task(p) => (tasks[p].room.as_str(), tables.distance(p, task)),
                };
                let record = &tasks[task];
                for arc in expander.expand(from, &record.room, travel) {
                    report.arcs.push(ArcRecord {
                        operator: operator.id.clone(),
                        arc,
                    });
                }

                let service_time = tables.service_time(task);
                cumulative = cumulative.saturating_add(travel).saturating_add(service_time);
                report.timings.push(TaskTiming {
                    operator: operator.id.clone(),
                    task: record.id.clone(),
                    room: record.room.clone(),
                    service_time,
                    cumulative_time: cumulative,
                });
            }
        }
        Ok(report)
    }

    pub fn arcs(&self) -> &[ArcRecord] {
        &self.arcs
    }

    pub fn timings(&self) -> &[TaskTiming] {
        &self.timings
    }

    /// Writes the arc section, a blank line, then the timing section.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        {
            let mut writer = semicolon_writer(&mut out);
            writer.write_record(ARC_HEADER)?;
            for record in &self.arcs {
                let travel = record.arc.travel_time.to_string();
                writer.write_record([
                    record.operator.as_str(),
                    record.arc.from.as_str(),
                    record.arc.to.as_str(),
                    travel.as_str(),
                ])?;
            }
            writer.flush()?;
        }

        out.write_all(b"\n")?;

        let mut writer = semicolon_writer(&mut out);
        writer.write_record(TIMING_HEADER)?;
        for timing in &self.timings {
            let service = timing.service_time.to_string();
            let cumulative = timing.cumulative_time.to_string();
            writer.write_record([
                timing.operator.as_str(),
                timing.task.as_str(),
                timing.room.as_str(),
                service.as_str(),
                cumulative.as_str(),
            ])?;
        }
        writer.flush()
    }

    /// Writes the report to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> OprResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| OprError::io(path, e))?;
        self.write_to(BufWriter::new(file))
            .map_err(|e| OprError::io(path, e))
    }
}

pub(crate) fn semicolon_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_writer(out)
}
