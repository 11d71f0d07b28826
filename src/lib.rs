//! Dependency-aware task prioritization.
//!
//! Orders a static task set so that every task comes after its
//! dependencies, breaking ties among ready tasks by priority, deadline,
//! estimated effort and finally task ID. Ordering is deterministic: the
//! same input always yields the same output.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `Deadline`
//! - **`validation`**: Input integrity checks (duplicate IDs, priority range,
//!   dependency refs, effort, deadlines, DAG cycles)
//! - **`graph`**: Dependency graph and cycle detection
//! - **`dispatching`**: Ranking rules and the rule engine
//! - **`scheduler`**: Ranked topological ordering and plans
//! - **`error`**: Error taxonomy
//!
//! # Example
//!
//! ```
//! use u_prioritize::{prioritize, models::Task};
//!
//! let tasks = vec![
//!     Task::new("A").with_priority(3),
//!     Task::new("B").with_priority(5).with_dependency("A"),
//!     Task::new("C").with_priority(1),
//! ];
//! let ordered = prioritize(tasks).unwrap();
//! let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
//! assert_eq!(ids, vec!["A", "C", "B"]);
//! ```
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod graph;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{ErrorKind, PrioritizeError, Result};
pub use models::{Deadline, Task};
pub use scheduler::{Plan, Scheduler, SelectionStrategy};

/// Orders tasks with the default scheduler (batch selection, standard ranking).
///
/// Returns the same records, reordered. Empty input yields an empty vector.
///
/// # Errors
/// Any [`PrioritizeError`]; no partial result is returned.
pub fn prioritize(tasks: Vec<Task>) -> Result<Vec<Task>> {
    Scheduler::default().prioritize(tasks)
}
