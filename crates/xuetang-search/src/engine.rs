//! Weighted fuzzy search across courses, resources, and learning paths.
//!
//! Every searchable item exposes weighted fields. Each field value is matched
//! with a [`Matcher`]; a field's score is its best value score. An item
//! matches when at least one field does, and its score is the product of
//! `max(score, ε)^weight` over the matched fields, so a lower score is a
//! better match and extra matching fields improve it.

use std::cmp::Ordering;

use xuetang_content::{Course, LearningPath, Resource};

use crate::fuzzy::Matcher;
use crate::types::{FieldMatch, SearchConfig, SearchHit, SearchResults};

/// Field scores are floored at this value before weighting, so an exact
/// match still differentiates by weight.
const SCORE_FLOOR: f64 = f64::EPSILON;

/// A weighted field of a searchable item.
#[derive(Debug, Clone)]
pub struct SearchField<'a> {
    pub key: &'static str,
    pub weight: f64,
    /// One value for scalar fields, one per element for list fields.
    pub values: Vec<&'a str>,
}

impl<'a> SearchField<'a> {
    fn scalar(key: &'static str, weight: f64, value: &'a str) -> Self {
        Self {
            key,
            weight,
            values: vec![value],
        }
    }

    fn list(key: &'static str, weight: f64, values: &'a [String]) -> Self {
        Self {
            key,
            weight,
            values: values.iter().map(String::as_str).collect(),
        }
    }
}

/// An item that can be ranked by [`SearchEngine`].
pub trait Searchable {
    fn search_fields(&self) -> Vec<SearchField<'_>>;
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::scalar("title", 0.4, &self.title),
            SearchField::scalar("summary", 0.3, &self.summary),
            SearchField::list("tags", 0.2, &self.tags),
            SearchField::list("instructors", 0.1, &self.instructors),
        ]
    }
}

impl Searchable for Resource {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::scalar("title", 0.5, &self.title),
            SearchField::scalar("description", 0.3, &self.description),
            SearchField::list("tags", 0.2, &self.tags),
        ]
    }
}

impl Searchable for LearningPath {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::scalar("title", 0.5, &self.title),
            SearchField::scalar("description", 0.3, &self.description),
            SearchField::scalar("audience", 0.2, &self.audience),
        ]
    }
}

/// Search over up to three borrowed collections.
#[derive(Debug, Clone)]
pub struct SearchEngine<'a> {
    config: SearchConfig,
    courses: &'a [Course],
    resources: &'a [Resource],
    learning_paths: &'a [LearningPath],
}

impl<'a> SearchEngine<'a> {
    /// An engine with no collections.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            courses: &[],
            resources: &[],
            learning_paths: &[],
        }
    }

    pub fn with_courses(mut self, courses: &'a [Course]) -> Self {
        self.courses = courses;
        self
    }

    pub fn with_resources(mut self, resources: &'a [Resource]) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_learning_paths(mut self, learning_paths: &'a [LearningPath]) -> Self {
        self.learning_paths = learning_paths;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rank every collection against `query`.
    ///
    /// A blank query, or one shorter than `min_match_length`, matches nothing.
    pub fn search(&self, query: &str) -> SearchResults<'a> {
        let Some(matcher) = Matcher::new(query, &self.config) else {
            return SearchResults::empty();
        };

        let results = SearchResults::new(
            self.rank(self.courses, &matcher),
            self.rank(self.resources, &matcher),
            self.rank(self.learning_paths, &matcher),
        );

        log::debug!(
            "Search {:?}: {} courses, {} resources, {} learning paths",
            query.trim(),
            results.courses.len(),
            results.resources.len(),
            results.learning_paths.len()
        );
        results
    }

    fn rank<T: Searchable>(&self, items: &'a [T], matcher: &Matcher) -> Vec<SearchHit<'a, T>> {
        let mut hits: Vec<SearchHit<'a, T>> = items
            .iter()
            .filter_map(|item| self.score_item(item, matcher))
            .collect();

        hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        if self.config.limit > 0 {
            hits.truncate(self.config.limit);
        }
        hits
    }

    fn score_item<T: Searchable>(&self, item: &'a T, matcher: &Matcher) -> Option<SearchHit<'a, T>> {
        let mut score = 1.0;
        let mut matched = false;
        let mut matches = Vec::new();

        for field in item.search_fields() {
            let mut best: Option<f64> = None;
            for value in field.values {
                let Some(m) = matcher.find(value) else {
                    continue;
                };
                best = Some(best.map_or(m.score, |b| b.min(m.score)));
                if self.config.include_matches {
                    matches.push(FieldMatch {
                        key: field.key,
                        value: value.to_string(),
                        ranges: m.ranges,
                    });
                }
            }
            if let Some(best) = best {
                matched = true;
                score *= best.max(SCORE_FLOOR).powf(field.weight);
            }
        }

        matched.then_some(SearchHit {
            item,
            score,
            matches,
        })
    }
}
