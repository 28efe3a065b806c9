//! Xuetang: the content pipeline of an educational course portal.
//!
//! This umbrella crate re-exports the pipeline crates and adds the
//! [`Portal`] facade, which loads a content tree once and answers catalog,
//! filter, and search queries over it.
//!
//! # Crates
//!
//! - `xuetang-core`: errors, validation reports, identifier helpers
//! - `xuetang-content`: schema, YAML parser, cached repository
//! - `xuetang-search`: facet filters, fuzzy search, domain detection
//!
//! # Example
//!
//! ```rust,no_run
//! use xuetang::{FacetSelection, Portal, PortalConfig};
//! use xuetang::content::Difficulty;
//!
//! # fn main() -> xuetang::Result<()> {
//! let config = PortalConfig::load("xuetang.toml")?;
//! let portal = Portal::open(&config)?;
//!
//! let beginner = portal.filter_courses(&FacetSelection::new().difficulty(Difficulty::Beginner));
//! let results = portal.search("mesa");
//! println!("{} beginner courses, {} search hits", beginner.len(), results.total_count);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod portal;

pub use xuetang_content as content;
pub use xuetang_core as core;
pub use xuetang_search as search;

pub use config::{CONTENT_DIR_ENV, PortalConfig};
pub use portal::{DanglingReference, Portal, ResolvedPath, ResolvedStep, StepTarget};
pub use xuetang_core::{Error, Result};
pub use xuetang_search::{FacetSelection, SearchConfig, SearchResults};
