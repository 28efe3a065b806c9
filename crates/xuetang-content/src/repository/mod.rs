//! File-system content repository.
//!
//! Reads course and resource directories, the learning-paths file, and the
//! site configuration from a [`ContentConfig`] layout. Every parsed document
//! goes through a shared [`ContentCache`], so repeated loads only re-parse
//! files whose modification time changed.
//!
//! Files are read in file-name order. Course lists are then ordered by year,
//! newest first, keeping file-name order within a year.

mod cache;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use xuetang_core::{Error, Result, is_kebab_case};

use crate::config::{CacheMode, ContentConfig, LoadPolicy, LoadingConfig};
use crate::parser::parse_with;
use crate::schema::{Course, LearningPath, LearningPathCatalog, Resource, Schema, SchemaContext, SiteConfig};

pub use cache::ContentCache;
use cache::Cached;

/// File extensions recognised as content files.
pub const CONTENT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// A record with a repository-wide identifier.
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Course {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Resource {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Loads validated content from disk.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    config: ContentConfig,
    policy: LoadPolicy,
    context: SchemaContext,
    cache: Arc<ContentCache>,
}

impl ContentRepository {
    /// Repository with its own revalidating cache and the abort policy.
    pub fn new(config: ContentConfig) -> Self {
        Self {
            config,
            policy: LoadPolicy::default(),
            context: SchemaContext::current(),
            cache: ContentCache::shared(CacheMode::default()),
        }
    }

    /// Repository configured from the `[loading]` section.
    pub fn from_config(config: ContentConfig, loading: LoadingConfig) -> Self {
        Self::new(config)
            .with_policy(loading.policy)
            .with_cache(ContentCache::shared(loading.cache))
    }

    /// Share an existing cache.
    pub fn with_cache(mut self, cache: Arc<ContentCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate with a fixed reference year instead of the local clock.
    pub fn with_schema_context(mut self, context: SchemaContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    // ------------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------------

    /// All courses, newest year first.
    ///
    /// A missing courses directory yields an empty list.
    pub fn load_courses(&self) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = self.load_collection(&self.config.courses_path())?;
        courses.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(courses)
    }

    /// All resources in file-name order.
    ///
    /// A missing resources directory yields an empty list.
    pub fn load_resources(&self) -> Result<Vec<Resource>> {
        self.load_collection(&self.config.resources_path())
    }

    /// One course by id.
    ///
    /// Ids that are not kebab-case never match. The file named after the id
    /// is tried first; otherwise the whole directory is searched. Under
    /// [`LoadPolicy::SkipInvalid`] an invalid `{id}.yaml` is skipped the same
    /// way [`load_courses`](Self::load_courses) skips it. A valid file named
    /// after the id is returned without scanning the rest of the directory
    /// for duplicates.
    pub fn load_course(&self, id: &str) -> Result<Option<Course>> {
        if !is_kebab_case(id) {
            log::debug!("Rejected course lookup for non-kebab-case id {id:?}");
            return Ok(None);
        }

        let dir = self.config.courses_path();
        for ext in CONTENT_EXTENSIONS {
            let path = dir.join(format!("{id}.{ext}"));
            if !path.is_file() {
                continue;
            }
            match self.load_file::<Course>(&path) {
                Ok(course) if course.id == id => return Ok(Some(Course::clone(&course))),
                Ok(_) => {}
                Err(e) if self.policy == LoadPolicy::SkipInvalid => {
                    log::warn!("Skipping {}: {e}", path.display());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.load_courses()?.into_iter().find(|c| c.id == id))
    }

    /// All learning paths from the aggregate file.
    ///
    /// A missing file yields an empty list.
    pub fn load_learning_paths(&self) -> Result<Vec<LearningPath>> {
        let path = self.config.learning_paths_path();
        if !path.is_file() {
            log::warn!("Learning paths file not found: {}", path.display());
            return Ok(Vec::new());
        }

        match self.load_file::<LearningPathCatalog>(&path) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} learning paths from {}",
                    catalog.paths.len(),
                    path.display()
                );
                Ok(catalog.paths.clone())
            }
            Err(e) if self.policy == LoadPolicy::SkipInvalid => {
                log::warn!("Skipping invalid learning paths file: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// The site configuration. Unlike the collections, it must exist.
    pub fn load_site_config(&self) -> Result<SiteConfig> {
        let path = self.config.site_config_path();
        let site = self.load_file::<SiteConfig>(&path)?;
        Ok(SiteConfig::clone(&site))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn load_file<T: Schema + Cached>(&self, path: &Path) -> Result<Arc<T>> {
        let context = self.context;
        self.cache.get_or_load(path, context, |p| {
            let text = fs::read_to_string(p).map_err(|e| Error::io_with_path(e, p))?;
            parse_with::<T>(&text, context).map_err(|e| Error::in_file(p, e))
        })
    }

    fn load_collection<T: Schema + Cached + Keyed + Clone>(&self, dir: &Path) -> Result<Vec<T>> {
        let files = list_content_files(dir)?;
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(files.len());

        for path in files {
            let item = match self.load_file::<T>(&path) {
                Ok(item) => item,
                Err(e) if self.policy == LoadPolicy::SkipInvalid => {
                    log::warn!("Skipping {}: {e}", path.display());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let id = item.key();
            if path.file_stem().and_then(|s| s.to_str()) != Some(id) {
                log::warn!(
                    "{} id '{id}' does not match file name {}",
                    T::KIND,
                    path.display()
                );
            }

            if !seen.insert(id.to_string()) {
                if self.policy == LoadPolicy::SkipInvalid {
                    log::warn!("Skipping duplicate {} id '{id}' in {}", T::KIND, path.display());
                    continue;
                }
                return Err(Error::duplicate_id(T::KIND, id));
            }

            items.push(T::clone(&item));
        }

        log::info!("Loaded {} {} files from {}", items.len(), T::KIND, dir.display());
        Ok(items)
    }
}

/// Content files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn list_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::warn!("Content directory not found: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io_with_path(e, dir))? {
        let path = entry.map_err(|e| Error::io_with_path(e, dir))?.path();
        let is_content = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext));
        if is_content && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
