//! Ranked topological scheduler.
//!
//! # Algorithm
//!
//! Kahn's algorithm with a ranked ready set:
//! 1. Every task starts **ready** (no dependencies) or **blocked**.
//! 2. Each round, rank the ready set with the rule engine and emit either
//!    all of it (batch) or its best task (single-pick).
//! 3. Emitting a task decrements the pending-dependency count of each of
//!    its dependents; a dependent whose count reaches zero becomes ready.
//! 4. Stop when every task is **scheduled**. An empty ready set before that
//!    point means a cycle.
//!
//! # Complexity
//! Batch: O((V + E) + V log V). Single-pick: O(V² + E) rule evaluations.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks", CACM 5(11)

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::plan::{Plan, PlanEntry};
use crate::dispatching::RuleEngine;
use crate::error::{PrioritizeError, Result};
use crate::models::Task;
use crate::validation::{validate_tasks, ValidatedTasks};

/// How many ready tasks are emitted per selection round.
///
/// The two strategies can produce different orders when several
/// independent chains are ready at once; a scheduler uses one for the
/// whole call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Emit the whole ready set in ranked order, then recompute readiness.
    /// Tasks unlocked during a round wait for the next round.
    #[default]
    Batch,
    /// Emit only the best-ranked ready task, then recompute readiness.
    SinglePick,
}

/// Per-task scheduling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Blocked,
    Ready,
    Scheduled,
}

/// Dependency-aware task scheduler.
///
/// Validates the task set, then emits tasks in an order that respects every
/// dependency, ranking simultaneously-ready tasks with its [`RuleEngine`].
///
/// # Example
///
/// ```
/// use u_prioritize::models::Task;
/// use u_prioritize::scheduler::{Scheduler, SelectionStrategy};
///
/// let tasks = vec![
///     Task::new("A").with_priority(3),
///     Task::new("B").with_priority(5).with_dependency("A"),
///     Task::new("C").with_priority(1),
/// ];
///
/// let batch = Scheduler::new().plan(&tasks).unwrap();
/// assert_eq!(batch.task_ids(), vec!["A", "C", "B"]);
///
/// let single = Scheduler::new()
///     .with_strategy(SelectionStrategy::SinglePick)
///     .plan(&tasks)
///     .unwrap();
/// assert_eq!(single.task_ids(), vec!["A", "B", "C"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    strategy: SelectionStrategy,
    rule_engine: RuleEngine,
}

impl Scheduler {
    /// Creates a scheduler with batch selection and the standard ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection strategy.
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the rule engine used to rank ready tasks.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Configured selection strategy.
    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Configured rule engine.
    pub fn rule_engine(&self) -> &RuleEngine {
        &self.rule_engine
    }

    /// Validates and orders a task set.
    ///
    /// # Errors
    /// The first validation error, or [`PrioritizeError::CircularDependency`]
    /// if ordering stalls.
    pub fn plan(&self, tasks: &[Task]) -> Result<Plan> {
        let validated = validate_tasks(tasks)?;
        self.plan_validated(&validated)
    }

    /// Orders a task set and returns the same records in emission order.
    ///
    /// Records are moved, not cloned or rewritten; deadlines keep the
    /// representation the caller supplied.
    pub fn prioritize(&self, tasks: Vec<Task>) -> Result<Vec<Task>> {
        let plan = self.plan(&tasks)?;
        Ok(plan.apply(tasks))
    }

    /// Orders an already validated task set.
    pub fn plan_validated(&self, validated: &ValidatedTasks<'_>) -> Result<Plan> {
        let tasks = validated.tasks();
        let graph = validated.graph();
        let n = tasks.len();

        debug!(tasks = n, strategy = ?self.strategy, "planning task order");

        let mut pending = graph.in_degrees();
        let mut states: Vec<TaskState> = tasks
            .iter()
            .map(|t| {
                if t.task.is_root() {
                    TaskState::Ready
                } else {
                    TaskState::Blocked
                }
            })
            .collect();
        let mut ready: Vec<usize> = (0..n).filter(|&i| tasks[i].task.is_root()).collect();
        let mut entries: Vec<PlanEntry> = Vec::with_capacity(n);
        let mut round = 0;

        while entries.len() < n {
            if ready.is_empty() {
                let scheduled: Vec<bool> = states
                    .iter()
                    .map(|&s| s == TaskState::Scheduled)
                    .collect();
                let member = graph
                    .cycle_member(&scheduled)
                    .or_else(|| scheduled.iter().position(|&done| !done))
                    .unwrap_or_default();
                warn!(
                    scheduled = entries.len(),
                    total = n,
                    "ordering stalled with unscheduled tasks"
                );
                return Err(PrioritizeError::CircularDependency {
                    task_id: tasks[member].id().to_string(),
                });
            }

            let picked = match self.strategy {
                SelectionStrategy::Batch => {
                    self.rule_engine.rank(tasks, &mut ready);
                    std::mem::take(&mut ready)
                }
                SelectionStrategy::SinglePick => {
                    let pos = self
                        .rule_engine
                        .select_best(tasks, &ready)
                        .unwrap_or_default();
                    vec![ready.remove(pos)]
                }
            };

            trace!(round, emitted = picked.len(), "selection round");

            for idx in picked {
                states[idx] = TaskState::Scheduled;
                entries.push(PlanEntry {
                    index: idx,
                    task_id: tasks[idx].id().to_string(),
                    round,
                });

                for &dependent in graph.dependents(idx) {
                    pending[dependent] -= 1;
                    if pending[dependent] == 0 {
                        states[dependent] = TaskState::Ready;
                        ready.push(dependent);
                    }
                }
            }

            round += 1;
        }

        debug!(tasks = n, rounds = round, "task order planned");
        Ok(Plan::new(self.strategy, entries))
    }
}
