//! Dependency-aware ordering.
//!
//! Provides the ranked topological scheduler and the plan it produces.
//!
//! # Algorithm
//!
//! `Scheduler` runs Kahn's algorithm over the validated dependency graph,
//! ranking simultaneously-ready tasks with a [`RuleEngine`](crate::dispatching::RuleEngine).
//! Ready tasks are emitted either a whole ready set per round
//! ([`SelectionStrategy::Batch`], the default) or one task per round
//! ([`SelectionStrategy::SinglePick`]).
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod plan;
mod topological;

pub use plan::{Plan, PlanEntry};
pub use topological::{Scheduler, SelectionStrategy};
