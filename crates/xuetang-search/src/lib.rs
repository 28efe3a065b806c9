//! Filtering, searching, and topical classification of Xuetang content.
//!
//! All operations work on in-memory collections produced by
//! `xuetang-content` and never touch the file system.
//!
//! # Modules
//!
//! - [`domain`]: keyword-based domain detection over a static table
//! - [`filter`]: facet filtering and facet vocabulary derivation
//! - [`fuzzy`]: approximate substring matching with match spans
//! - [`engine`]: weighted fuzzy ranking across courses, resources, and
//!   learning paths
//! - [`highlight`]: split text into marked/unmarked segments from match spans
//! - [`types`]: search configuration and result types

pub mod domain;
pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod highlight;
pub mod types;

mod proptests;

pub use domain::{Domain, DomainInfo, DomainText, detect, detect_text};
pub use engine::{SearchEngine, SearchField, Searchable};
pub use filter::{AvailableFilters, FacetSelection, Facetable, available_filters, filter, matches};
pub use fuzzy::{FuzzyMatch, MAX_FUZZY_QUERY_CHARS, Matcher};
pub use highlight::{Segment, highlight};
pub use types::{FieldMatch, SearchConfig, SearchHit, SearchResults};
