//! Repository layer: in-memory designer collection and its persistence seams.
//!
//! # Responsibility
//! - Own the authoritative designer collection and its derived queries.
//! - Isolate snapshot SQL details from repository orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, out-of-range) in
//!   addition to remote and snapshot transport errors.
//! - Read accessors return `Option`, never an error.

pub mod aggregate;
pub mod designer_repo;
pub mod snapshot_repo;
