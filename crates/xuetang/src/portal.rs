//! The portal facade: load a content tree once, then query it.
//!
//! [`Portal`] owns the loaded collections and hands out borrowed views for
//! catalog pages, facet filters, search, and learning-path rendering.
//! [`Portal::reload`] re-reads the tree through the repository cache, so
//! unchanged files are not parsed again.

use std::collections::BTreeSet;

use xuetang_content::{
    ContentRepository, Course, LearningPath, LearningStep, Resource, SiteConfig, StepKind,
};
use xuetang_core::{Result, normalize_id};
use xuetang_search::{
    AvailableFilters, Domain, DomainText, FacetSelection, SearchConfig, SearchEngine,
    SearchResults, available_filters, detect, filter,
};

use crate::config::PortalConfig;

/// A loaded content tree.
#[derive(Debug)]
pub struct Portal {
    repository: ContentRepository,
    search: SearchConfig,
    courses: Vec<Course>,
    resources: Vec<Resource>,
    learning_paths: Vec<LearningPath>,
    site: SiteConfig,
}

/// What a learning-path step points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTarget<'a> {
    Course(&'a Course),
    Resource(&'a Resource),
    Practice,
    /// The referenced course or resource is not in the catalog.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStep<'a> {
    pub step: &'a LearningStep,
    pub target: StepTarget<'a>,
}

/// A learning path with its steps in `order` and their targets looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath<'a> {
    pub path: &'a LearningPath,
    pub steps: Vec<ResolvedStep<'a>>,
}

impl ResolvedPath<'_> {
    /// Number of steps whose target is missing.
    pub fn missing(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.target == StepTarget::Missing)
            .count()
    }
}

/// A reference to an id that no loaded record has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Where the reference lives, e.g. `learning path 'abm-track' step 2`.
    pub source: String,
    /// `"course"` or `"resource"`.
    pub kind: &'static str,
    pub id: String,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} references unknown {} '{}'", self.source, self.kind, self.id)
    }
}

struct Tree {
    courses: Vec<Course>,
    resources: Vec<Resource>,
    learning_paths: Vec<LearningPath>,
    site: SiteConfig,
}

impl Tree {
    fn read(repository: &ContentRepository) -> Result<Self> {
        Ok(Self {
            courses: repository.load_courses()?,
            resources: repository.load_resources()?,
            learning_paths: repository.load_learning_paths()?,
            site: repository.load_site_config()?,
        })
    }
}

/// Find an item by id: an exact match first, then one whose id normalizes
/// to the same kebab-case form as `id`.
fn lookup<'a, T>(items: &'a [T], id: &str, key: impl Fn(&T) -> &String) -> Option<&'a T> {
    items.iter().find(|item| key(*item) == id).or_else(|| {
        let wanted = normalize_id(id);
        items.iter().find(|item| normalize_id(key(*item)) == wanted)
    })
}

impl Portal {
    /// Build a repository from `config` and load everything.
    pub fn open(config: &PortalConfig) -> Result<Self> {
        let repository = ContentRepository::from_config(config.content.clone(), config.loading);
        Self::load(repository, config.search.clone())
    }

    /// Load every collection and the site config through `repository`.
    pub fn load(repository: ContentRepository, search: SearchConfig) -> Result<Self> {
        search.validate()?;
        let tree = Tree::read(&repository)?;
        let portal = Self {
            repository,
            search,
            courses: tree.courses,
            resources: tree.resources,
            learning_paths: tree.learning_paths,
            site: tree.site,
        };
        portal.report_loaded();
        Ok(portal)
    }

    /// Re-read the content tree. On error the previous state is kept.
    pub fn reload(&mut self) -> Result<()> {
        let tree = Tree::read(&self.repository)?;
        self.courses = tree.courses;
        self.resources = tree.resources;
        self.learning_paths = tree.learning_paths;
        self.site = tree.site;
        self.report_loaded();
        Ok(())
    }

    fn report_loaded(&self) {
        log::info!(
            "Portal loaded {} courses, {} resources, {} learning paths",
            self.courses.len(),
            self.resources.len(),
            self.learning_paths.len()
        );
        for dangling in self.check_references() {
            log::warn!("{dangling}");
        }
    }

    pub fn repository(&self) -> &ContentRepository {
        &self.repository
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Newest year first.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn learning_paths(&self) -> &[LearningPath] {
        &self.learning_paths
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// A course by id. An exact id wins; otherwise ids are compared in
    /// normalized kebab-case form, so `"Intro GIS"` finds `intro-gis`.
    pub fn course(&self, id: &str) -> Option<&Course> {
        lookup(&self.courses, id, |c| &c.id)
    }

    /// A resource by id, with the same matching as [`Portal::course`].
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        lookup(&self.resources, id, |r| &r.id)
    }

    /// A learning path by id, with the same matching as [`Portal::course`].
    pub fn learning_path(&self, id: &str) -> Option<&LearningPath> {
        lookup(&self.learning_paths, id, |p| &p.id)
    }

    /// Featured courses in configured order. Unknown ids are skipped.
    pub fn featured_courses(&self) -> Vec<&Course> {
        self.site
            .featured_courses
            .iter()
            .filter_map(|id| {
                let course = self.courses.iter().find(|c| c.id == *id);
                if course.is_none() {
                    log::warn!("Featured course '{id}' not found");
                }
                course
            })
            .collect()
    }

    /// Resolve a learning path's steps against the loaded catalog.
    pub fn resolve_learning_path(&self, id: &str) -> Option<ResolvedPath<'_>> {
        let path = self.learning_path(id)?;
        let steps = path
            .ordered_steps()
            .into_iter()
            .map(|step| ResolvedStep {
                step,
                target: self.step_target(step),
            })
            .collect();
        Some(ResolvedPath { path, steps })
    }

    fn step_target(&self, step: &LearningStep) -> StepTarget<'_> {
        let target = match step.kind {
            StepKind::Course => step
                .course_id
                .as_deref()
                .and_then(|id| self.courses.iter().find(|c| c.id == id))
                .map(StepTarget::Course),
            StepKind::Resource => step
                .resource_id
                .as_deref()
                .and_then(|id| self.resource(id))
                .map(StepTarget::Resource),
            StepKind::Practice => Some(StepTarget::Practice),
        };
        target.unwrap_or(StepTarget::Missing)
    }

    /// Learning-path steps and featured courses that point at unknown ids.
    pub fn check_references(&self) -> Vec<DanglingReference> {
        let courses: BTreeSet<&str> = self.courses.iter().map(|c| c.id.as_str()).collect();
        let resources: BTreeSet<&str> = self.resources.iter().map(|r| r.id.as_str()).collect();
        let mut dangling = Vec::new();

        for path in &self.learning_paths {
            for step in path.ordered_steps() {
                let (kind, id, known) = match (step.kind, &step.course_id, &step.resource_id) {
                    (StepKind::Course, Some(id), _) => ("course", id, &courses),
                    (StepKind::Resource, _, Some(id)) => ("resource", id, &resources),
                    _ => continue,
                };
                if !known.contains(id.as_str()) {
                    dangling.push(DanglingReference {
                        source: format!("learning path '{}' step {}", path.id, step.order),
                        kind,
                        id: id.clone(),
                    });
                }
            }
        }

        for id in &self.site.featured_courses {
            if !courses.contains(id.as_str()) {
                dangling.push(DanglingReference {
                    source: "site featured_courses".to_string(),
                    kind: "course",
                    id: id.clone(),
                });
            }
        }
        dangling
    }

    // ------------------------------------------------------------------------
    // Filtering and search
    // ------------------------------------------------------------------------

    pub fn filter_courses(&self, facets: &FacetSelection) -> Vec<&Course> {
        filter(&self.courses, facets)
    }

    pub fn filter_resources(&self, facets: &FacetSelection) -> Vec<&Resource> {
        filter(&self.resources, facets)
    }

    pub fn available_course_filters(&self) -> AvailableFilters {
        available_filters(&self.courses)
    }

    pub fn available_resource_filters(&self) -> AvailableFilters {
        available_filters(&self.resources)
    }

    /// Fuzzy search across all three collections.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        SearchEngine::new(self.search.clone())
            .with_courses(&self.courses)
            .with_resources(&self.resources)
            .with_learning_paths(&self.learning_paths)
            .search(query)
    }

    pub fn domains_of<T: DomainText + ?Sized>(&self, item: &T) -> BTreeSet<Domain> {
        detect(item)
    }
}
