//! Plan (solution) model.
//!
//! A plan is the emission order produced by the scheduler: one entry per
//! task, each tagged with the selection round that emitted it.

use serde::{Deserialize, Serialize};

use super::SelectionStrategy;

/// One emitted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Position of the task in the input slice.
    pub index: usize,
    /// Task ID (denormalized for query convenience).
    pub task_id: String,
    /// Zero-based selection round. In batch mode this is the dependency level.
    pub round: usize,
}

/// A complete ordering of a task set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    strategy: SelectionStrategy,
    entries: Vec<PlanEntry>,
}

impl Plan {
    pub(crate) fn new(strategy: SelectionStrategy, entries: Vec<PlanEntry>) -> Self {
        Self { strategy, entries }
    }

    /// Strategy that produced this plan.
    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Entries in emission order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of planned tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Task IDs in emission order.
    pub fn task_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.task_id.as_str()).collect()
    }

    /// Input indices in emission order.
    pub fn order(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }

    /// Number of selection rounds.
    pub fn round_count(&self) -> usize {
        self.entries.last().map(|e| e.round + 1).unwrap_or(0)
    }

    /// Task IDs grouped by round.
    pub fn rounds(&self) -> Vec<Vec<&str>> {
        let mut rounds: Vec<Vec<&str>> = vec![Vec::new(); self.round_count()];
        for entry in &self.entries {
            rounds[entry.round].push(&entry.task_id);
        }
        rounds
    }

    /// Round in which a task was emitted.
    pub fn round_of(&self, task_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.task_id == task_id)
            .map(|e| e.round)
    }

    /// Reorders `items` (parallel to the planned input) into emission order.
    ///
    /// Items whose index is not in the plan are dropped.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        self.entries
            .iter()
            .filter_map(|e| slots.get_mut(e.index).and_then(Option::take))
            .collect()
    }
}
