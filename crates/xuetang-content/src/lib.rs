//! Content schema, parsing, and loading for the Xuetang course portal.
//!
//! The crate implements the first three stages of the content pipeline:
//!
//! - [`schema`]: typed records (`Course`, `LearningPath`, `Resource`,
//!   `SiteConfig`) and validators that report every violated constraint
//! - [`parser`]: YAML text → validated record, with distinct syntax and
//!   validation failures
//! - [`repository`]: enumerates content files, sorts them, and memoizes parsed
//!   documents keyed by modification time
//!
//! # Example
//!
//! ```rust
//! use xuetang_content::{parse, Resource};
//!
//! let yaml = r#"
//! id: geopandas-docs
//! title: GeoPandas Documentation
//! type: docs
//! url: https://geopandas.org/
//! tags: [python, gis]
//! description: Official reference for spatial dataframes.
//! language: en
//! "#;
//!
//! let resource: Resource = parse(yaml).unwrap();
//! assert_eq!(resource.id, "geopandas-docs");
//! ```

pub mod config;
pub mod parser;
pub mod repository;
pub mod schema;

mod proptests;

pub use config::{CacheMode, ContentConfig, LoadPolicy, LoadingConfig};
pub use parser::{parse, parse_value, parse_with, to_yaml};
pub use repository::{ContentCache, ContentRepository};
pub use schema::{
    Announcement, AnnouncementKind, Course, CourseKind, CourseLinks, Difficulty, Language,
    LearningPath, LearningPathCatalog, LearningStep, Materials, NavItem, Reference,
    ReferenceKind, Resource, ResourceKind, Schema, SchemaContext, SchemaEnum, Session,
    SiteConfig, SiteMeta, SocialLink, StepKind,
};
