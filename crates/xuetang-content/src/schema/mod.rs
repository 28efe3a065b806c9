//! Typed content records and their validators.
//!
//! Every record type implements [`Schema`]: given an untyped YAML tree it
//! either produces the typed record or returns a [`ValidationErrors`] report
//! naming every field that broke a constraint. Unknown keys are ignored.

mod checker;
mod course;
mod enums;
mod learning_path;
mod resource;
mod site;

use chrono::Datelike;
use serde_yaml::Value;
use xuetang_core::ValidationErrors;

pub use checker::{Checker, FieldPath, Obj};
pub use course::{Course, CourseLinks, Materials, Reference, Session};
pub use enums::{
    AnnouncementKind, CourseKind, Difficulty, Language, ReferenceKind, ResourceKind, SchemaEnum,
    StepKind,
};
pub use learning_path::{LearningPath, LearningPathCatalog, LearningStep};
pub use resource::Resource;
pub use site::{Announcement, NavItem, SiteConfig, SiteMeta, SocialLink};

/// Values the validators need from outside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaContext {
    /// Reference year for the course year bound.
    pub current_year: i32,
}

impl SchemaContext {
    /// Context based on the local clock.
    pub fn current() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
        }
    }

    /// Context with a fixed reference year.
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }
}

impl Default for SchemaContext {
    fn default() -> Self {
        Self::current()
    }
}

/// A content record that can be validated from untyped YAML.
pub trait Schema: Sized {
    /// Short name of the record kind, used in log messages and errors.
    const KIND: &'static str;

    /// Walk `value` (located at `path`), recording violations in `ck`.
    ///
    /// Returns `None` when the record could not be built.
    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self>;

    /// Validate against the local clock.
    fn validate(value: &Value) -> Result<Self, ValidationErrors> {
        Self::validate_with(value, SchemaContext::current())
    }

    /// Validate with an explicit context.
    fn validate_with(value: &Value, context: SchemaContext) -> Result<Self, ValidationErrors> {
        let mut ck = Checker::new(context);
        let record = Self::check(value, &FieldPath::root(), &mut ck);
        ck.finish(record)
    }
}
