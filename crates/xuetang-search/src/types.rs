//! Search configuration and result types.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use xuetang_content::{Course, LearningPath, Resource};
use xuetang_core::{Error, Result};

/// Search configuration, the `[search]` section of the portal config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Highest accepted field score; `0.0` requires an exact substring,
    /// `1.0` accepts anything.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Queries shorter than this (in characters, after trimming) match
    /// nothing.
    #[serde(default = "default_min_match_length")]
    pub min_match_length: usize,

    /// Maximum hits per collection; `0` means unlimited.
    #[serde(default)]
    pub limit: usize,

    /// Attach match spans to each hit.
    #[serde(default = "default_true")]
    pub include_matches: bool,
}

fn default_threshold() -> f64 {
    0.4
}

fn default_min_match_length() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_match_length: default_min_match_length(),
            limit: 0,
            include_matches: default_true(),
        }
    }
}

impl SearchConfig {
    /// Reject out-of-range settings.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::config(format!(
                "search.threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.min_match_length == 0 {
            return Err(Error::config("search.min_match_length must be at least 1"));
        }
        Ok(())
    }
}

/// Where a query matched inside one field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    /// Field name, e.g. `title` or `tags`.
    pub key: &'static str,
    /// The matched value (one element for list fields).
    pub value: String,
    /// Character ranges within `value`.
    pub ranges: Vec<Range<usize>>,
}

/// One ranked item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    /// In `[0, 1]`; lower is a better match.
    pub score: f64,
    /// Empty when match spans are disabled.
    pub matches: Vec<FieldMatch>,
}

/// Ranked hits for each collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    pub courses: Vec<SearchHit<'a, Course>>,
    pub resources: Vec<SearchHit<'a, Resource>>,
    pub learning_paths: Vec<SearchHit<'a, LearningPath>>,
    /// Sum of the three list lengths.
    pub total_count: usize,
}

impl<'a> SearchResults<'a> {
    /// Results with no hits.
    pub fn empty() -> Self {
        Self {
            courses: Vec::new(),
            resources: Vec::new(),
            learning_paths: Vec::new(),
            total_count: 0,
        }
    }

    pub(crate) fn new(
        courses: Vec<SearchHit<'a, Course>>,
        resources: Vec<SearchHit<'a, Resource>>,
        learning_paths: Vec<SearchHit<'a, LearningPath>>,
    ) -> Self {
        let total_count = courses.len() + resources.len() + learning_paths.len();
        Self {
            courses,
            resources,
            learning_paths,
            total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
