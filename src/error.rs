//! Error types.
//!
//! Two failure categories exist. [`OprError::InfeasibleInput`] means the
//! input tables cannot support the requested operation: a task nobody can
//! perform, mismatched table shapes, or a move whose precondition does not
//! hold. It aborts the trial and is never retried. [`OprError::Io`] comes from
//! the persistence helpers in [`crate::report`] and never reaches the search.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::moves::Phase;

/// Why an input (or a move request) is infeasible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// The problem has no tasks.
    NoTasks,
    /// The problem has no operators.
    NoOperators,
    /// No operator has the skill required by this task.
    NoEligibleOperator {
        task: usize,
    },
    /// A table does not have the expected length.
    DimensionMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A task record references a skill no operator record knows, or
    /// records and tables disagree on the task count.
    RecordMismatch {
        detail: String,
    },
    /// The move of the given phase cannot be generated from the Cmax route.
    MoveUnavailable {
        phase: Phase,
        route: usize,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::NoTasks => write!(f, "problem has no tasks"),
            Infeasibility::NoOperators => write!(f, "problem has no operators"),
            Infeasibility::NoEligibleOperator { task } => {
                write!(f, "task {} has no eligible operator", task)
            }
            Infeasibility::DimensionMismatch {
                table,
                expected,
                actual,
            } => write!(
                f,
                "table '{}' has length {}, expected {}",
                table, actual, expected
            ),
            Infeasibility::RecordMismatch { detail } => write!(f, "{}", detail),
            Infeasibility::MoveUnavailable { phase, route } => write!(
                f,
                "{} move cannot be generated from route {}",
                phase, route
            ),
        }
    }
}

/// Errors produced by this crate.
#[derive(Debug)]
pub enum OprError {
    /// Fatal for the trial: malformed tables or a violated move precondition.
    InfeasibleInput(Infeasibility),
    /// A cache, report or log file could not be read or written.
    Io { path: PathBuf, source: io::Error },
}

impl OprError {
    /// Shorthand for an IO failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        OprError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the infeasibility reason, if this is an input error.
    pub fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            OprError::InfeasibleInput(reason) => Some(reason),
            OprError::Io { .. } => None,
        }
    }
}

impl fmt::Display for OprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OprError::InfeasibleInput(reason) => write!(f, "infeasible input: {}", reason),
            OprError::Io { path, source } => {
                write!(f, "io failure on '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OprError::Io { source, .. } => Some(source),
            OprError::InfeasibleInput(_) => None,
        }
    }
}

impl From<Infeasibility> for OprError {
    fn from(reason: Infeasibility) -> Self {
        OprError::InfeasibleInput(reason)
    }
}

pub type OprResult<T> = std::result::Result<T, OprError>;
