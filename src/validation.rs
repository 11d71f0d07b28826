//! Input validation for prioritization.
//!
//! Checks structural integrity of the task set before any ordering work.
//! Detects:
//! - Duplicate IDs
//! - Priorities outside `1..=5`
//! - Dependencies on unknown tasks
//! - Negative or non-finite effort estimates
//! - Unparsable deadline text
//! - Circular dependencies (DAG validation)
//!
//! All structural checks run over the whole list before the cycle check,
//! so a structural defect is always reported ahead of a cycle.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{PrioritizeError, Result};
use crate::graph::DependencyGraph;
use crate::models::{Task, MAX_PRIORITY, MIN_PRIORITY};

/// A validated task with its deadline resolved to a UTC instant.
///
/// Borrows the caller's record; the record itself is never modified.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedTask<'a> {
    /// The original task record.
    pub task: &'a Task,
    /// Resolved deadline. `None` = no deadline.
    pub deadline: Option<DateTime<Utc>>,
}

impl<'a> NormalizedTask<'a> {
    /// Task identifier.
    pub fn id(&self) -> &'a str {
        &self.task.id
    }
}

/// Output of a successful validation pass.
///
/// Holds the normalized tasks (same order as the input) and the dependency
/// graph built over them, so the scheduler does not rebuild it.
#[derive(Debug, Clone)]
pub struct ValidatedTasks<'a> {
    tasks: Vec<NormalizedTask<'a>>,
    graph: DependencyGraph,
}

impl<'a> ValidatedTasks<'a> {
    /// Normalized tasks, in input order.
    pub fn tasks(&self) -> &[NormalizedTask<'a>] {
        &self.tasks
    }

    /// Dependency graph over [`tasks`](Self::tasks) indices.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the task set is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Validates a task set, failing on the first violation.
///
/// Checks, in order:
/// 1. No duplicate task IDs
/// 2. Per task, in input order: priority range, dependency existence,
///    effort estimate, deadline parse
/// 3. No circular dependencies
///
/// # Returns
/// The normalized tasks and their dependency graph, or the first error found.
pub fn validate_tasks(tasks: &[Task]) -> Result<ValidatedTasks<'_>> {
    let validated = check_structure(tasks)?;

    if let Some(idx) = validated.graph.find_cycle() {
        return Err(PrioritizeError::CircularDependency {
            task_id: tasks[idx].id.clone(),
        });
    }

    debug!(tasks = validated.len(), "validated task set");
    Ok(validated)
}

/// Collects every violation instead of stopping at the first.
///
/// Structural violations are reported for all tasks. The cycle check only
/// runs when the structure is sound, since a graph with dangling edges has
/// no meaningful cycle answer.
///
/// # Returns
/// An empty vector if the input is valid.
pub fn collect_errors(tasks: &[Task]) -> Vec<PrioritizeError> {
    let mut errors = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());

    for (i, task) in tasks.iter().enumerate() {
        if index.insert(task.id.as_str(), i).is_some() {
            errors.push(PrioritizeError::DuplicateIdentifier {
                task_id: task.id.clone(),
            });
        }
    }

    for task in tasks {
        if let Err(e) = check_priority(task) {
            errors.push(e);
        }
        for dep in &task.dependencies {
            if !index.contains_key(dep.as_str()) {
                errors.push(PrioritizeError::InvalidDependency {
                    task_id: task.id.clone(),
                    dependency_id: dep.clone(),
                });
            }
        }
        if let Err(e) = check_effort(task) {
            errors.push(e);
        }
        if let Err(e) = resolve_deadline(task) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        let graph = DependencyGraph::new(tasks, &index);
        if let Some(idx) = graph.find_cycle() {
            errors.push(PrioritizeError::CircularDependency {
                task_id: tasks[idx].id.clone(),
            });
        }
    }

    errors
}

/// Runs every check except the cycle check.
pub(crate) fn check_structure(tasks: &[Task]) -> Result<ValidatedTasks<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        if index.insert(task.id.as_str(), i).is_some() {
            return Err(PrioritizeError::DuplicateIdentifier {
                task_id: task.id.clone(),
            });
        }
    }

    let mut normalized = Vec::with_capacity(tasks.len());
    for task in tasks {
        check_priority(task)?;
        if let Some(dep) = task
            .dependencies
            .iter()
            .find(|dep| !index.contains_key(dep.as_str()))
        {
            return Err(PrioritizeError::InvalidDependency {
                task_id: task.id.clone(),
                dependency_id: dep.clone(),
            });
        }
        check_effort(task)?;
        normalized.push(NormalizedTask {
            task,
            deadline: resolve_deadline(task)?,
        });
    }

    let graph = DependencyGraph::new(tasks, &index);
    Ok(ValidatedTasks {
        tasks: normalized,
        graph,
    })
}

fn check_priority(task: &Task) -> Result<()> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&task.priority) {
        Ok(())
    } else {
        Err(PrioritizeError::InvalidPriority {
            task_id: task.id.clone(),
            priority: task.priority,
        })
    }
}

fn check_effort(task: &Task) -> Result<()> {
    match task.estimated_hours {
        Some(hours) if !hours.is_finite() || hours < 0.0 => Err(PrioritizeError::InvalidEffort {
            task_id: task.id.clone(),
            hours,
        }),
        _ => Ok(()),
    }
}

fn resolve_deadline(task: &Task) -> Result<Option<DateTime<Utc>>> {
    match &task.deadline {
        None => Ok(None),
        Some(deadline) => deadline
            .resolve()
            .map(Some)
            .ok_or_else(|| PrioritizeError::InvalidDeadline {
                task_id: task.id.clone(),
                value: deadline.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Deadline;
    use chrono::TimeZone;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("A").with_priority(3),
            Task::new("B").with_priority(5).with_dependency("A"),
            Task::new("C")
                .with_priority(1)
                .with_deadline("2024-05-01")
                .with_estimated_hours(2.0),
        ]
    }

    #[test]
    fn test_valid_input() {
        let tasks = sample_tasks();
        let validated = validate_tasks(&tasks).unwrap();
        assert_eq!(validated.len(), 3);
        assert_eq!(validated.tasks()[2].id(), "C");
        assert_eq!(
            validated.tasks()[2].deadline,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert!(collect_errors(&tasks).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let validated = validate_tasks(&[]).unwrap();
        assert!(validated.is_empty());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new("J1"), Task::new("J2"), Task::new("J1")];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            err,
            PrioritizeError::DuplicateIdentifier {
                task_id: "J1".into()
            }
        );
    }

    #[test]
    fn test_priority_out_of_range() {
        for bad in [0, 6, -1] {
            let tasks = vec![Task::new("T").with_priority(bad)];
            let err = validate_tasks(&tasks).unwrap_err();
            assert_eq!(
                err,
                PrioritizeError::InvalidPriority {
                    task_id: "T".into(),
                    priority: bad
                }
            );
        }
        for good in [1, 5] {
            let tasks = vec![Task::new("T").with_priority(good)];
            assert!(validate_tasks(&tasks).is_ok());
        }
    }

    #[test]
    fn test_invalid_dependency() {
        let tasks = vec![Task::new("A").with_dependency("ghost")];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            err,
            PrioritizeError::InvalidDependency {
                task_id: "A".into(),
                dependency_id: "ghost".into()
            }
        );
    }

    #[test]
    fn test_invalid_effort() {
        for bad in [-0.5, f64::NAN, f64::INFINITY] {
            let tasks = vec![Task::new("T").with_estimated_hours(bad)];
            let err = validate_tasks(&tasks).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEffort);
            assert_eq!(err.task_id(), "T");
        }
        let tasks = vec![Task::new("T").with_estimated_hours(0.0)];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_invalid_deadline() {
        let tasks = vec![Task::new("T").with_deadline("someday")];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            err,
            PrioritizeError::InvalidDeadline {
                task_id: "T".into(),
                value: "someday".into()
            }
        );
    }

    #[test]
    fn test_native_deadline_accepted() {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let tasks = vec![Task::new("T").with_deadline(Deadline::At(at))];
        let validated = validate_tasks(&tasks).unwrap();
        assert_eq!(validated.tasks()[0].deadline, Some(at));
    }

    #[test]
    fn test_cyclic_dependency() {
        // A → B → C → A
        let tasks = vec![
            Task::new("A").with_dependency("C"),
            Task::new("B").with_dependency("A"),
            Task::new("C").with_dependency("B"),
        ];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CircularDependency);
        assert!(["A", "B", "C"].contains(&err.task_id()));
    }

    #[test]
    fn test_self_dependency() {
        let tasks = vec![Task::new("A").with_dependency("A")];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            err,
            PrioritizeError::CircularDependency {
                task_id: "A".into()
            }
        );
    }

    #[test]
    fn test_cycle_member_reported_not_downstream() {
        // X depends on the A ⇄ B cycle but is not part of it
        let tasks = vec![
            Task::new("X").with_dependency("A"),
            Task::new("A").with_dependency("B"),
            Task::new("B").with_dependency("A"),
        ];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CircularDependency);
        assert!(["A", "B"].contains(&err.task_id()));
    }

    #[test]
    fn test_structural_error_reported_before_cycle() {
        let tasks = vec![
            Task::new("A").with_dependency("B"),
            Task::new("B").with_dependency("A"),
            Task::new("C").with_priority(9),
        ];
        let err = validate_tasks(&tasks).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPriority);
    }

    #[test]
    fn test_no_cycle_in_diamond() {
        // A → {B, C} → D
        let tasks = vec![
            Task::new("A"),
            Task::new("B").with_dependency("A"),
            Task::new("C").with_dependency("A"),
            Task::new("D").with_dependencies(["B", "C"]),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_collect_multiple_errors() {
        let tasks = vec![
            Task::new("A").with_priority(0),
            Task::new("A").with_dependency("missing"),
            Task::new("B").with_estimated_hours(-1.0).with_deadline("nope"),
        ];
        let kinds: Vec<ErrorKind> = collect_errors(&tasks).iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::DuplicateIdentifier,
                ErrorKind::InvalidPriority,
                ErrorKind::InvalidDependency,
                ErrorKind::InvalidEffort,
                ErrorKind::InvalidDeadline,
            ]
        );
    }

    #[test]
    fn test_collect_reports_cycle_when_structure_sound() {
        let tasks = vec![
            Task::new("A").with_dependency("B"),
            Task::new("B").with_dependency("A"),
        ];
        let errors = collect_errors(&tasks);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::CircularDependency);
    }
}
