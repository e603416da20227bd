//! Domain model for the competency tracker.
//!
//! # Responsibility
//! - Define the fixed catalog of tools, proficiency levels, priorities and
//!   action statuses.
//! - Define the canonical `Designer` record and its nested entries.
//!
//! # Invariants
//! - Every designer is identified by a slug derived once from its name.
//! - Catalog lookups for unknown keys resolve to a defined default.

pub mod catalog;
pub mod designer;
