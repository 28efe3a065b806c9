//! Portal configuration.
//!
//! A TOML file with `[content]`, `[loading]`, and `[search]` sections; every
//! key has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [content]
//! root = "content"
//!
//! [loading]
//! policy = "skip_invalid"
//!
//! [search]
//! threshold = 0.3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use xuetang_content::{ContentConfig, LoadingConfig};
use xuetang_core::{Error, Result};
use xuetang_search::SearchConfig;

/// Environment variable that overrides `content.root`.
pub const CONTENT_DIR_ENV: &str = "XUETANG_CONTENT_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub loading: LoadingConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl PortalConfig {
    /// Parse and validate TOML text. Relative paths are left as written.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// A relative `content.root` is resolved against the file's directory,
    /// then [`CONTENT_DIR_ENV`] overrides it when set.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(dir) = path.parent() {
            config.content.resolve_root(dir);
        }
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        log::debug!(
            "Loaded portal config from {} (content root {})",
            path.display(),
            config.content.root.display()
        );
        Ok(config)
    }

    /// Apply overrides from a variable lookup, usually the process
    /// environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(CONTENT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            log::debug!("{CONTENT_DIR_ENV} overrides content root: {root}");
            self.content.root = root.into();
        }
    }

    /// Check value ranges and required names.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;

        let names = [
            ("content.courses_dir", &self.content.courses_dir),
            ("content.resources_dir", &self.content.resources_dir),
            ("content.learning_paths_file", &self.content.learning_paths_file),
            ("content.site_config_file", &self.content.site_config_file),
        ];
        for (key, value) in names {
            if value.as_os_str().is_empty() {
                return Err(Error::config(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
