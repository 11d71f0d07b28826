//! Task model.
//!
//! A task is a unit of work to be ordered. It carries ranking metadata
//! (priority, deadline, effort) and the ids of the tasks that must come
//! before it.

use serde::{Deserialize, Serialize};

use super::Deadline;

/// Lowest accepted priority.
pub const MIN_PRIORITY: i32 = 1;
/// Highest accepted priority (most urgent).
pub const MAX_PRIORITY: i32 = 5;

/// A task to be prioritized.
///
/// Values are stored as supplied. Range checks happen in
/// [`validation`](crate::validation), so an out-of-range priority or a
/// negative estimate is reported rather than clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Optional deadline. `None` ranks after any present deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Deadline>,
    /// Priority in `1..=5` (5 = most urgent).
    pub priority: i32,
    /// Ids of tasks that must be ordered before this one.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Effort estimate in hours. `None` ranks after any present estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl Task {
    /// Creates a new task with the given ID and the lowest priority.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            deadline: None,
            priority: MIN_PRIORITY,
            dependencies: Vec::new(),
            estimated_hours: None,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline (native instant or text).
    pub fn with_deadline(mut self, deadline: impl Into<Deadline>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Adds several dependencies.
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the effort estimate in hours.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Whether this task has no dependencies.
    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}
