//! Utility modules.
//!
//! # Modules
//!
//! - [`ids`]: Identifier normalization and kebab-case checks

pub mod ids;
