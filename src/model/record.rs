//! Pre-resolved task and operator records.
//!
//! The loading layer (XML, CSV, database) is external; it resolves its
//! input into these immutable records once and passes them as slices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Cost;

/// A manual action to be performed in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    /// External task identifier.
    pub id: String,
    /// Room where the task is performed.
    pub room: String,
    /// Skill code an operator needs to perform the task.
    pub skill: String,
    /// Time spent performing the task once there.
    pub service_time: Cost,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        room: impl Into<String>,
        skill: impl Into<String>,
        service_time: Cost,
    ) -> Self {
        Self {
            id: id.into(),
            room: room.into(),
            skill: skill.into(),
            service_time,
        }
    }
}

/// An operator and the skills they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operator {
    /// External operator identifier.
    pub id: String,
    /// Skill codes this operator can perform.
    pub skills: Vec<String>,
}

impl Operator {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            skills: Vec::new(),
        }
    }

    /// Adds a skill code.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Whether this operator can perform `task`.
    pub fn can_perform(&self, task: &Task) -> bool {
        self.skills.iter().any(|s| *s == task.skill)
    }
}
