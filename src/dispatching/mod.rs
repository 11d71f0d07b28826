//! Ranking rules and rule engine for ready-task selection.
//!
//! Provides the ranking rules used to order tasks whose dependencies are
//! satisfied (priority, deadline, effort) and a rule engine that chains
//! them lexicographically with a deterministic final tie-break.
//!
//! # Usage
//!
//! ```
//! use u_prioritize::dispatching::{RuleEngine, TieBreaker};
//! use u_prioritize::dispatching::rules;
//!
//! // Equivalent to RuleEngine::standard()
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Priority)
//!     .with_rule(rules::EarliestDeadline)
//!     .with_rule(rules::ShortestEffort)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! assert_eq!(engine.rule_names(), vec!["PRIORITY", "EDD", "SEF"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::validation::NormalizedTask;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher rank (emitted first).
pub type RuleScore = f64;

/// A rule that ranks ready tasks.
///
/// # Score Convention
/// **Lower score = higher rank.** Rules return smaller values for tasks
/// that should be emitted first. Absent attributes score `f64::INFINITY`.
///
/// Ordering goes through [`compare`](RankingRule::compare), which must be a
/// total order. The default compares scores with `f64::total_cmp`; rules
/// whose key does not fit an `f64` exactly override it.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PRIORITY", "EDD").
    fn name(&self) -> &'static str;

    /// Scores a task. Lower = emitted earlier.
    fn evaluate(&self, task: &NormalizedTask<'_>) -> RuleScore;

    /// Compares two tasks on this rule's key. `Less` = `a` first.
    fn compare(&self, a: &NormalizedTask<'_>, b: &NormalizedTask<'_>) -> Ordering {
        self.evaluate(a).total_cmp(&self.evaluate(b))
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
