//! Content layout and loading configuration.
//!
//! These types are embedded in the portal's TOML configuration as the
//! `[content]` and `[loading]` sections.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What to do when one content file fails to parse or validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Fail the whole load with the file's error.
    #[default]
    Abort,
    /// Log a warning, skip the file, and keep going.
    SkipInvalid,
}

/// How cached documents are checked for freshness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Compare the file's modification time on every access.
    #[default]
    Revalidate,
    /// Never re-read a cached file for the life of the cache.
    Permanent,
}

/// Where content lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root; the other paths are relative to it.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory of course files (one course per file).
    #[serde(default = "default_courses_dir")]
    pub courses_dir: PathBuf,

    /// Directory of resource files (one resource per file).
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    /// Aggregate learning-paths file.
    #[serde(default = "default_learning_paths_file")]
    pub learning_paths_file: PathBuf,

    /// Site configuration file.
    #[serde(default = "default_site_config_file")]
    pub site_config_file: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_courses_dir() -> PathBuf {
    PathBuf::from("courses")
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_learning_paths_file() -> PathBuf {
    PathBuf::from("learning-paths.yaml")
}

fn default_site_config_file() -> PathBuf {
    PathBuf::from("site.yaml")
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            courses_dir: default_courses_dir(),
            resources_dir: default_resources_dir(),
            learning_paths_file: default_learning_paths_file(),
            site_config_file: default_site_config_file(),
        }
    }
}

impl ContentConfig {
    /// Default layout under the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn courses_path(&self) -> PathBuf {
        self.root.join(&self.courses_dir)
    }

    pub fn resources_path(&self) -> PathBuf {
        self.root.join(&self.resources_dir)
    }

    pub fn learning_paths_path(&self) -> PathBuf {
        self.root.join(&self.learning_paths_file)
    }

    pub fn site_config_path(&self) -> PathBuf {
        self.root.join(&self.site_config_file)
    }

    /// Resolve a relative root against `base` (usually the directory of the
    /// configuration file).
    pub fn resolve_root(&mut self, base: &Path) {
        if self.root.is_relative() {
            self.root = base.join(&self.root);
        }
    }
}

/// Loading behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadingConfig {
    #[serde(default)]
    pub policy: LoadPolicy,

    #[serde(default)]
    pub cache: CacheMode,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_config_default_paths() {
        let config = ContentConfig::with_root("/srv/portal");
        assert_eq!(config.courses_path(), PathBuf::from("/srv/portal/courses"));
        assert_eq!(
            config.learning_paths_path(),
            PathBuf::from("/srv/portal/learning-paths.yaml")
        );
        assert_eq!(config.site_config_path(), PathBuf::from("/srv/portal/site.yaml"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ContentConfig = serde_yaml::from_str("courses_dir: offerings").unwrap();
        assert_eq!(config.root, PathBuf::from("content"));
        assert_eq!(config.courses_dir, PathBuf::from("offerings"));
        assert_eq!(config.resources_dir, PathBuf::from("resources"));
    }

    #[test]
    fn test_resolve_root() {
        let mut relative = ContentConfig::default();
        relative.resolve_root(Path::new("/etc/xuetang"));
        assert_eq!(relative.root, PathBuf::from("/etc/xuetang/content"));

        let mut absolute = ContentConfig::with_root("/data");
        absolute.resolve_root(Path::new("/etc/xuetang"));
        assert_eq!(absolute.root, PathBuf::from("/data"));
    }

    #[test]
    fn test_loading_config_names() {
        let config: LoadingConfig =
            serde_yaml::from_str("policy: skip_invalid\ncache: permanent").unwrap();
        assert_eq!(config.policy, LoadPolicy::SkipInvalid);
        assert_eq!(config.cache, CacheMode::Permanent);
        assert_eq!(LoadingConfig::default().policy, LoadPolicy::Abort);
    }
}
