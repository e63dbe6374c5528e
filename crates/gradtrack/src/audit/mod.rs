//! Graduation requirement evaluation.
//!
//! The engine consumes a course catalog, a snapshot of the student's course
//! records, and a requirement specification, and produces a
//! [`CreditSummary`]: per-category and total credit sums, missing mandatory
//! courses, and a `can_graduate` determination with ordered warnings. It
//! performs no I/O, never mutates its inputs, and is recomputed from scratch
//! on every call.

mod config;
mod processor;
mod types;

pub use config::{GraduationRequirements, RequirementCategory, SubcategoryRequirement};
pub use processor::RequirementEngine;
pub use types::*;
