//! Prioritization domain models.
//!
//! Provides the caller-facing task record and its deadline representation.
//! Everything here is plain data: validation and normalization live in
//! [`validation`](crate::validation), ordering in
//! [`scheduler`](crate::scheduler).
//!
//! # Field Semantics
//!
//! | Field | Absent | Ranking |
//! |-------|--------|---------|
//! | `priority` | required | descending |
//! | `deadline` | sorts last | ascending |
//! | `estimated_hours` | sorts last | ascending |
//! | `id` | required | final tie-break, ascending |

mod deadline;
mod task;

pub use deadline::Deadline;
pub use task::{Task, MAX_PRIORITY, MIN_PRIORITY};
