//! Xuetang Core: shared errors, validation reports, and identifier helpers.
//!
//! This crate provides the foundational types used across all Xuetang crates.
//! It has no internal Xuetang dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`validation`]: Field-level violations collected by schema validators
//! - [`util`]: Identifier utilities

pub mod error;
pub mod util;
pub mod validation;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use validation::{ValidationErrors, Violation};

// Convenience re-exports from util
pub use util::ids::{is_kebab_case, normalize_id};
