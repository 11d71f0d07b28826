//! Built-in ranking rules.
//!
//! - **PRIORITY**: higher `priority` first
//! - **EDD**: earlier deadline first, no deadline last
//! - **SEF**: smaller effort estimate first, no estimate last
//!
//! # Score Convention
//! All rules return lower scores for tasks that should be emitted first.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Jackson (1955), EDD; Smith (1956), SPT

use std::cmp::Ordering;

use super::{RankingRule, RuleScore};
use crate::validation::NormalizedTask;

/// Orders present values with `cmp`, absent values after all present ones.
fn absent_last<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Priority rule.
///
/// Prioritizes tasks with higher `priority` values.
/// (Negated because lower score = higher rank in convention.)
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl RankingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, task: &NormalizedTask<'_>) -> RuleScore {
        -(task.task.priority as f64)
    }

    fn compare(&self, a: &NormalizedTask<'_>, b: &NormalizedTask<'_>) -> Ordering {
        b.task.priority.cmp(&a.task.priority)
    }

    fn description(&self) -> &'static str {
        "Task Priority"
    }
}

/// Earliest Due Date.
///
/// Ranks by resolved deadline, compared as instants at full (nanosecond)
/// precision. Tasks without a deadline rank after every task that has one.
/// The score is the Unix timestamp in seconds and is informational only.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct EarliestDeadline;

impl RankingRule for EarliestDeadline {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, task: &NormalizedTask<'_>) -> RuleScore {
        task.deadline
            .map(|d| d.timestamp() as f64 + f64::from(d.timestamp_subsec_nanos()) * 1e-9)
            .unwrap_or(f64::INFINITY)
    }

    fn compare(&self, a: &NormalizedTask<'_>, b: &NormalizedTask<'_>) -> Ordering {
        absent_last(a.deadline, b.deadline, |a, b| a.cmp(&b))
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Shortest Estimated Effort.
///
/// The estimate-based analogue of SPT. Tasks without an estimate rank
/// after every task that has one.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestEffort;

impl RankingRule for ShortestEffort {
    fn name(&self) -> &'static str {
        "SEF"
    }

    fn evaluate(&self, task: &NormalizedTask<'_>) -> RuleScore {
        task.task.estimated_hours.unwrap_or(f64::INFINITY)
    }

    fn compare(&self, a: &NormalizedTask<'_>, b: &NormalizedTask<'_>) -> Ordering {
        // Validated estimates are finite, so partial_cmp only falls back for
        // unvalidated input; total_cmp keeps the order total either way.
        absent_last(a.task.estimated_hours, b.task.estimated_hours, |a, b| {
            a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
        })
    }

    fn description(&self) -> &'static str {
        "Shortest Estimated Effort"
    }
}
