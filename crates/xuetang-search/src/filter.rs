//! Facet filtering.
//!
//! A [`FacetSelection`] holds the selected values of each facet category. An
//! item passes when it satisfies every category that has at least one
//! selected value; within a category one selected value is enough. Tags match
//! by case-insensitive substring, domains by [`detect`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use xuetang_content::{Course, Difficulty, Language, Resource, SchemaEnum};

use crate::domain::{Domain, DomainText, detect};

/// Selected values per facet category. Empty categories are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection {
    #[serde(default)]
    pub difficulties: Vec<Difficulty>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Years as strings, e.g. `"2024"`.
    #[serde(default)]
    pub years: Vec<String>,
    /// Course or resource `type` values.
    #[serde(default)]
    pub kinds: Vec<String>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no category has a selected value.
    pub fn is_empty(&self) -> bool {
        self.difficulties.is_empty()
            && self.tags.is_empty()
            && self.years.is_empty()
            && self.kinds.is_empty()
            && self.languages.is_empty()
            && self.domains.is_empty()
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulties.push(difficulty);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn year(mut self, year: impl ToString) -> Self {
        self.years.push(year.to_string());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kinds.push(kind.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.languages.push(language);
        self
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domains.push(domain);
        self
    }
}

/// Facet values of a filterable item.
pub trait Facetable: DomainText {
    fn difficulty(&self) -> Option<Difficulty>;
    fn tags(&self) -> &[String];
    fn year(&self) -> Option<i32>;
    /// The serialized `type` value.
    fn kind(&self) -> &'static str;
    fn language(&self) -> Language;
}

impl Facetable for Course {
    fn difficulty(&self) -> Option<Difficulty> {
        Some(self.difficulty)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn year(&self) -> Option<i32> {
        Some(self.year)
    }

    fn kind(&self) -> &'static str {
        self.kind.as_str()
    }

    fn language(&self) -> Language {
        self.language
    }
}

impl Facetable for Resource {
    fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn year(&self) -> Option<i32> {
        None
    }

    fn kind(&self) -> &'static str {
        self.kind.as_str()
    }

    fn language(&self) -> Language {
        self.language
    }
}

/// Returns `true` when `item` satisfies every non-empty category.
pub fn matches<T: Facetable + ?Sized>(item: &T, facets: &FacetSelection) -> bool {
    if !facets.difficulties.is_empty()
        && !item
            .difficulty()
            .is_some_and(|d| facets.difficulties.contains(&d))
    {
        return false;
    }

    if !facets.tags.is_empty() {
        let own: Vec<String> = item.tags().iter().map(|t| t.to_lowercase()).collect();
        let hit = facets.tags.iter().any(|selected| {
            let selected = selected.to_lowercase();
            own.iter().any(|tag| tag.contains(&selected))
        });
        if !hit {
            return false;
        }
    }

    if !facets.years.is_empty()
        && !item
            .year()
            .is_some_and(|y| facets.years.iter().any(|s| *s == y.to_string()))
    {
        return false;
    }

    if !facets.kinds.is_empty() && !facets.kinds.iter().any(|k| k == item.kind()) {
        return false;
    }

    if !facets.languages.is_empty() && !facets.languages.contains(&item.language()) {
        return false;
    }

    if !facets.domains.is_empty() {
        let found = detect(item);
        if !facets.domains.iter().any(|d| found.contains(d)) {
            return false;
        }
    }

    true
}

/// Items satisfying `facets`, in their original order.
pub fn filter<'a, T: Facetable>(items: &'a [T], facets: &FacetSelection) -> Vec<&'a T> {
    if facets.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| matches(*item, facets)).collect()
}

/// The distinct facet values present in a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailableFilters {
    pub difficulties: Vec<Difficulty>,
    pub tags: Vec<String>,
    /// Newest first.
    pub years: Vec<String>,
    pub kinds: Vec<String>,
    pub languages: Vec<Language>,
    pub domains: Vec<Domain>,
}

/// Scan `items` once and collect every facet value.
///
/// Years are sorted descending; everything else ascending by its serialized
/// form.
pub fn available_filters<T: Facetable>(items: &[T]) -> AvailableFilters {
    let mut difficulties = BTreeSet::new();
    let mut tags = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut kinds = BTreeSet::new();
    let mut languages = BTreeSet::new();
    let mut domains = BTreeSet::new();

    for item in items {
        if let Some(d) = item.difficulty() {
            difficulties.insert(d.as_str());
        }
        tags.extend(item.tags().iter().cloned());
        if let Some(y) = item.year() {
            years.insert(y);
        }
        kinds.insert(item.kind());
        languages.insert(item.language().as_str());
        domains.extend(detect(item).into_iter().map(Domain::as_str));
    }

    AvailableFilters {
        difficulties: difficulties.into_iter().filter_map(Difficulty::parse).collect(),
        tags: tags.into_iter().collect(),
        years: years.into_iter().rev().map(|y| y.to_string()).collect(),
        kinds: kinds.into_iter().map(str::to_string).collect(),
        languages: languages.into_iter().filter_map(Language::parse).collect(),
        domains: domains.into_iter().filter_map(|d| d.parse().ok()).collect(),
    }
}

// ============================================================================
// Tests
// ============================================================================
