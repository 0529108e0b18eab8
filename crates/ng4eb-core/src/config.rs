//! Book configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for ng4eb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content location settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Directory the configuration was loaded from. Relative content
    /// paths resolve against it.
    #[serde(skip)]
    pub root: PathBuf,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, appended to page titles.
    pub title: String,

    /// Base URL for the site (e.g., "https://www.ng4eb.com").
    pub base_url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Where the chapter listing and part files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding `ch{N}p{M}.md` files.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// TOML file describing chapters and parts.
    #[serde(default = "default_listing")]
    pub listing: PathBuf,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result cap for quick search.
    #[serde(default = "default_quick_limit")]
    pub quick_limit: usize,

    /// Snippet length (characters) for bounded searches.
    #[serde(default = "default_quick_snippet_len")]
    pub quick_snippet_len: usize,

    /// Snippet length (characters) for unbounded searches.
    #[serde(default = "default_full_snippet_len")]
    pub full_snippet_len: usize,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_listing() -> PathBuf {
    PathBuf::from("listing.toml")
}

fn default_quick_limit() -> usize {
    3
}

fn default_quick_snippet_len() -> usize {
    100
}

fn default_full_snippet_len() -> usize {
    300
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            listing: default_listing(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quick_limit: default_quick_limit(),
            quick_snippet_len: default_quick_snippet_len(),
            full_snippet_len: default_full_snippet_len(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.root = config_root(path);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, allowing `NG4EB__`
    /// environment overrides (e.g. `NG4EB__SEARCH__QUICK_LIMIT=5`).
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("NG4EB").separator("__"))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.root = config_root(path);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.search.quick_limit == 0 {
            return Err(CoreError::config("search.quick_limit must be at least 1"));
        }

        if self.search.quick_snippet_len == 0 || self.search.full_snippet_len == 0 {
            return Err(CoreError::config("search snippet lengths must be at least 1"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Directory holding the part markdown files.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.content.dir)
    }

    /// Path of the chapter listing file.
    pub fn listing_path(&self) -> PathBuf {
        self.root.join(&self.content.listing)
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

fn config_root(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
