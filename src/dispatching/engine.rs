//! Rule engine for multi-key ranking.
//!
//! Chains ranking rules lexicographically: the next rule is consulted only
//! when the previous ones tie, and a final tie-breaker settles whatever
//! remains.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, RankingRule, RuleScore};
use crate::validation::NormalizedTask;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Deterministic by task ID (lexicographic ascending).
    #[default]
    ById,
    /// Leave ties as equal; candidate order decides.
    Stable,
}

/// A composable rule engine for ready-task ranking.
///
/// # Example
/// ```
/// use u_prioritize::dispatching::{RuleEngine, TieBreaker};
/// use u_prioritize::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::EarliestDeadline)
///     .with_rule(rules::Priority)
///     .with_final_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.rule_names(), vec!["EDD", "PRIORITY"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn RankingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine (id tie-break only).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::ById,
        }
    }

    /// The default ranking policy.
    ///
    /// 1. Priority descending
    /// 2. Deadline ascending (no deadline last)
    /// 3. Estimated effort ascending (no estimate last)
    /// 4. Task ID ascending
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::Priority)
            .with_rule(rules::EarliestDeadline)
            .with_rule(rules::ShortestEffort)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Appends a rule. Rules are consulted in the order they were added.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts candidate indices in place, best first.
    ///
    /// `candidates` index into `tasks`.
    pub fn rank(&self, tasks: &[NormalizedTask<'_>], candidates: &mut [usize]) {
        candidates.sort_by(|&a, &b| self.compare(&tasks[a], &tasks[b]));
    }

    /// Returns every task index sorted best first.
    pub fn sort_indices(&self, tasks: &[NormalizedTask<'_>]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..tasks.len()).collect();
        self.rank(tasks, &mut indices);
        indices
    }

    /// Returns the position within `candidates` of the best-ranked task.
    pub fn select_best(
        &self,
        tasks: &[NormalizedTask<'_>],
        candidates: &[usize],
    ) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|x, y| self.compare(&tasks[*x.1], &tasks[*y.1]))
            .map(|(pos, _)| pos)
    }

    /// Evaluates a single task and returns the score from each rule.
    pub fn evaluate(&self, task: &NormalizedTask<'_>) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(task)).collect()
    }

    /// Compares two tasks. `Less` means `a` is emitted before `b`.
    pub fn compare(&self, a: &NormalizedTask<'_>, b: &NormalizedTask<'_>) -> Ordering {
        for rule in &self.rules {
            match rule.compare(a, b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        // All rules tied → use final tie-breaker
        match self.tie_breaker {
            TieBreaker::ById => a.id().cmp(b.id()),
            TieBreaker::Stable => Ordering::Equal,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap())
    }

    fn normalize(tasks: &[(Task, Option<DateTime<Utc>>)]) -> Vec<NormalizedTask<'_>> {
        tasks
            .iter()
            .map(|(task, deadline)| NormalizedTask {
                task,
                deadline: *deadline,
            })
            .collect()
    }

    fn ids(tasks: &[NormalizedTask<'_>], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| tasks[i].task.id.clone()).collect()
    }

    #[test]
    fn test_priority_dominates() {
        let raw = vec![
            (Task::new("low").with_priority(1).with_estimated_hours(0.1), at(1)),
            (Task::new("high").with_priority(5).with_estimated_hours(9.0), at(30)),
        ];
        let tasks = normalize(&raw);
        let order = RuleEngine::standard().sort_indices(&tasks);
        assert_eq!(ids(&tasks, &order), vec!["high", "low"]);
    }

    #[test]
    fn test_deadline_then_effort() {
        let raw = vec![
            (Task::new("none").with_priority(3), None),
            (Task::new("late").with_priority(3), at(20)),
            (Task::new("early_long").with_priority(3).with_estimated_hours(5.0), at(2)),
            (Task::new("early_short").with_priority(3).with_estimated_hours(1.0), at(2)),
            (Task::new("early_unknown").with_priority(3), at(2)),
        ];
        let tasks = normalize(&raw);
        let order = RuleEngine::standard().sort_indices(&tasks);
        assert_eq!(
            ids(&tasks, &order),
            vec!["early_short", "early_long", "early_unknown", "late", "none"]
        );
    }

    #[test]
    fn test_near_equal_efforts_sort_consistently() {
        // Gaps far below any float tolerance must still order strictly.
        let raw: Vec<(Task, Option<DateTime<Utc>>)> = (0..40)
            .rev()
            .map(|k| {
                (
                    Task::new(format!("t{k:02}"))
                        .with_priority(3)
                        .with_estimated_hours(f64::from(k) * 0.6e-9),
                    None,
                )
            })
            .collect();
        let tasks = normalize(&raw);
        let order = RuleEngine::standard().sort_indices(&tasks);
        let expected: Vec<String> = (0..40).map(|k| format!("t{k:02}")).collect();
        assert_eq!(ids(&tasks, &order), expected);
    }

    #[test]
    fn test_smaller_effort_beats_id() {
        let raw = vec![
            (Task::new("a").with_priority(3).with_estimated_hours(1e-10), None),
            (Task::new("b").with_priority(3).with_estimated_hours(0.0), None),
        ];
        let tasks = normalize(&raw);
        let order = RuleEngine::standard().sort_indices(&tasks);
        assert_eq!(ids(&tasks, &order), vec!["b", "a"]);
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let raw = vec![
            (Task::new("b").with_priority(2), None),
            (Task::new("a").with_priority(2), None),
            (Task::new("c").with_priority(2), None),
        ];
        let tasks = normalize(&raw);
        let order = RuleEngine::standard().sort_indices(&tasks);
        assert_eq!(ids(&tasks, &order), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stable_tie_breaker_keeps_candidate_order() {
        let raw = vec![
            (Task::new("b").with_priority(2), None),
            (Task::new("a").with_priority(2), None),
        ];
        let tasks = normalize(&raw);
        let engine = RuleEngine::standard().with_final_tie_breaker(TieBreaker::Stable);
        let order = engine.sort_indices(&tasks);
        assert_eq!(ids(&tasks, &order), vec!["b", "a"]);
    }

    #[test]
    fn test_rank_subset() {
        let raw = vec![
            (Task::new("a").with_priority(1), None),
            (Task::new("b").with_priority(4), None),
            (Task::new("c").with_priority(2), None),
        ];
        let tasks = normalize(&raw);
        let mut candidates = vec![0, 2];
        RuleEngine::standard().rank(&tasks, &mut candidates);
        assert_eq!(candidates, vec![2, 0]);
    }

    #[test]
    fn test_select_best() {
        let raw = vec![
            (Task::new("a").with_priority(1), None),
            (Task::new("b").with_priority(4), None),
            (Task::new("c").with_priority(4), at(3)),
        ];
        let tasks = normalize(&raw);
        let engine = RuleEngine::standard();
        // c has a deadline, b does not → c wins; position 1 within candidates
        assert_eq!(engine.select_best(&tasks, &[1, 2, 0]), Some(1));
        assert_eq!(engine.select_best(&tasks, &[]), None);
    }

    #[test]
    fn test_evaluate_scores() {
        let raw = vec![(Task::new("t").with_priority(4).with_estimated_hours(3.0), None)];
        let tasks = normalize(&raw);
        let scores = RuleEngine::standard().evaluate(&tasks[0]);
        assert_eq!(scores.len(), 3);
        assert!((scores[0] + 4.0).abs() < 1e-10);
        assert!(scores[1].is_infinite());
        assert!((scores[2] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_debug_lists_rules() {
        let dbg = format!("{:?}", RuleEngine::standard());
        assert!(dbg.contains("PRIORITY"));
        assert!(dbg.contains("EDD"));
        assert!(dbg.contains("SEF"));
    }
}
