//! Core use-case services.
//!
//! # Responsibility
//! - Turn form-level input into repository calls.
//! - Keep the CLI decoupled from storage details.

pub mod tracker_service;
