//! Presentation layer.
//!
//! # Responsibility
//! - Map repository state to HTML fragments for the dashboard views.
//!
//! # Invariants
//! - Rendering is read-only; nothing here can mutate a designer.
//! - All interpolated text is HTML-escaped.

pub mod html;
