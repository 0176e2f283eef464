//! Problem and solution model.
//!
//! Tasks and operators are identified by their index (`0..T`, `0..O`).
//! [`CostTables`] holds everything the search reads; [`Solution`] is what it
//! writes: one [`Route`] per operator.

mod record;
mod route;
mod solution;
mod tables;

pub use record::{Operator, Task};
pub use route::{route_cost, Route, Stop};
pub use solution::{Solution, Violation};
pub use tables::CostTables;

/// Travel and service times (e.g. seconds).
pub type Cost = u64;
