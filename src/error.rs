//! Error taxonomy for validation and scheduling.
//!
//! Every failure aborts the whole call. Each variant carries the offending
//! task id (and value, where there is one) so the caller can fix the input
//! directly.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PrioritizeError>;

/// A validation or scheduling failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrioritizeError {
    /// Priority outside the accepted range.
    #[error("Task '{task_id}' has invalid priority {priority} (expected {min}..={max})",
        min = crate::models::MIN_PRIORITY, max = crate::models::MAX_PRIORITY)]
    InvalidPriority { task_id: String, priority: i32 },

    /// A dependency references a task that is not in the input set.
    #[error("Task '{task_id}' depends on unknown task '{dependency_id}'")]
    InvalidDependency {
        task_id: String,
        dependency_id: String,
    },

    /// Two tasks share an identifier.
    #[error("Duplicate task ID: {task_id}")]
    DuplicateIdentifier { task_id: String },

    /// Deadline text could not be parsed into a point in time.
    #[error("Task '{task_id}' has unparsable deadline '{value}'")]
    InvalidDeadline { task_id: String, value: String },

    /// Estimated effort is negative or not a finite number.
    #[error("Task '{task_id}' has invalid estimated hours {hours}")]
    InvalidEffort { task_id: String, hours: f64 },

    /// The dependency graph contains a cycle.
    #[error("Circular dependency detected involving task '{task_id}'")]
    CircularDependency { task_id: String },
}

/// Kind discriminator for [`PrioritizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`PrioritizeError::InvalidPriority`].
    InvalidPriority,
    /// See [`PrioritizeError::InvalidDependency`].
    InvalidDependency,
    /// See [`PrioritizeError::DuplicateIdentifier`].
    DuplicateIdentifier,
    /// See [`PrioritizeError::InvalidDeadline`].
    InvalidDeadline,
    /// See [`PrioritizeError::InvalidEffort`].
    InvalidEffort,
    /// See [`PrioritizeError::CircularDependency`].
    CircularDependency,
}

impl PrioritizeError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPriority { .. } => ErrorKind::InvalidPriority,
            Self::InvalidDependency { .. } => ErrorKind::InvalidDependency,
            Self::DuplicateIdentifier { .. } => ErrorKind::DuplicateIdentifier,
            Self::InvalidDeadline { .. } => ErrorKind::InvalidDeadline,
            Self::InvalidEffort { .. } => ErrorKind::InvalidEffort,
            Self::CircularDependency { .. } => ErrorKind::CircularDependency,
        }
    }

    /// Returns the id of the task the error is attached to.
    pub fn task_id(&self) -> &str {
        match self {
            Self::InvalidPriority { task_id, .. }
            | Self::InvalidDependency { task_id, .. }
            | Self::DuplicateIdentifier { task_id }
            | Self::InvalidDeadline { task_id, .. }
            | Self::InvalidEffort { task_id, .. }
            | Self::CircularDependency { task_id } => task_id,
        }
    }
}
