//! Parsed-document cache keyed by path and modification time.
//!
//! Each content kind has its own map from file path and [`SchemaContext`] to
//! the parsed document and the modification time observed when it was read.
//! Repositories validating with different contexts can share one cache. In
//! [`CacheMode::Revalidate`] a lookup stats the file and re-parses when the
//! stored time differs; in [`CacheMode::Permanent`] a cached entry is always
//! reused. The cache is safe to share between threads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use xuetang_core::{Error, Result};

use crate::config::CacheMode;
use crate::schema::{Course, LearningPathCatalog, Resource, SchemaContext, SiteConfig};

type DocKey = (PathBuf, SchemaContext);

struct CachedDoc<T> {
    modified: Option<SystemTime>,
    value: Arc<T>,
}

pub(crate) struct DocCache<T> {
    entries: RwLock<HashMap<DocKey, CachedDoc<T>>>,
}

impl<T> Default for DocCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> DocCache<T> {
    fn get(&self, key: &DocKey, modified: Option<SystemTime>, any_time: bool) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|doc| any_time || doc.modified == modified)
            .map(|doc| Arc::clone(&doc.value))
    }

    fn insert(&self, key: DocKey, modified: Option<SystemTime>, value: Arc<T>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, CachedDoc { modified, value });
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// A document kind the cache can hold.
pub(crate) trait Cached: Sized {
    fn slot(cache: &ContentCache) -> &DocCache<Self>;
}

impl Cached for Course {
    fn slot(cache: &ContentCache) -> &DocCache<Self> {
        &cache.courses
    }
}

impl Cached for Resource {
    fn slot(cache: &ContentCache) -> &DocCache<Self> {
        &cache.resources
    }
}

impl Cached for LearningPathCatalog {
    fn slot(cache: &ContentCache) -> &DocCache<Self> {
        &cache.learning_paths
    }
}

impl Cached for SiteConfig {
    fn slot(cache: &ContentCache) -> &DocCache<Self> {
        &cache.site
    }
}

/// Shared cache of parsed content documents.
pub struct ContentCache {
    mode: CacheMode,
    courses: DocCache<Course>,
    resources: DocCache<Resource>,
    learning_paths: DocCache<LearningPathCatalog>,
    site: DocCache<SiteConfig>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCache")
            .field("mode", &self.mode)
            .field("len", &self.len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(CacheMode::default())
    }
}

impl ContentCache {
    pub fn new(mode: CacheMode) -> Self {
        Self {
            mode,
            courses: DocCache::default(),
            resources: DocCache::default(),
            learning_paths: DocCache::default(),
            site: DocCache::default(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A new cache wrapped for sharing between repositories.
    pub fn shared(mode: CacheMode) -> Arc<Self> {
        Arc::new(Self::new(mode))
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to read and parse the file.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cached documents across all kinds.
    pub fn len(&self) -> usize {
        self.courses.len() + self.resources.len() + self.learning_paths.len() + self.site.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached document. Counters are kept.
    pub fn clear(&self) {
        self.courses.clear();
        self.resources.clear();
        self.learning_paths.clear();
        self.site.clear();
        log::debug!("Content cache cleared");
    }

    /// Return the document cached for `path` under `context`, or run `load`
    /// and cache its result. Failed loads are not cached.
    pub(crate) fn get_or_load<T: Cached>(
        &self,
        path: &Path,
        context: SchemaContext,
        load: impl FnOnce(&Path) -> Result<T>,
    ) -> Result<Arc<T>> {
        let slot = T::slot(self);
        let permanent = self.mode == CacheMode::Permanent;

        let modified = if permanent {
            None
        } else {
            Some(
                std::fs::metadata(path)
                    .and_then(|m| m.modified())
                    .map_err(|e| Error::io_with_path(e, path))?,
            )
        };

        let key = (path.to_path_buf(), context);
        if let Some(value) = slot.get(&key, modified, permanent) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache hit: {}", path.display());
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("Cache miss: {}", path.display());
        let value = Arc::new(load(path)?);
        slot.insert(key, modified, Arc::clone(&value));
        Ok(value)
    }
}
