//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! content = "content"     # markdown posts
//! output = "public"       # generated site
//! assets = "assets"       # copied verbatim into the output
//!
//! [build.sitemap]
//! enable = false
//! path = "sitemap.xml"
//!
//! [build.search]
//! enable = true
//! path = "search-index.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Sitemap generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Output path for sitemap file, relative to the output directory.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: false,
            path: "sitemap.xml".into(),
        }
    }
}

/// Search index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Emit the JSON index and the search script.
    pub enable: bool,
    /// Index path, relative to the output directory.
    pub path: PathBuf,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "search-index.json".into(),
        }
    }
}

/// Build paths and output toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content directory (markdown posts).
    pub content: PathBuf,

    /// Output directory.
    pub output: PathBuf,

    /// Static assets copied verbatim into the output directory.
    pub assets: PathBuf,

    /// Remove the output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    pub sitemap: SitemapConfig,

    pub search: SearchConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            assets: "assets".into(),
            clean: false,
            sitemap: SitemapConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const SITEMAP_PATH: FieldPath = FieldPath::new("build.sitemap.path");
    pub const SEARCH_PATH: FieldPath = FieldPath::new("build.search.path");

    /// Resolve directories against the project root.
    pub fn normalize(&mut self, root: &Path) {
        use crate::utils::path::normalize_path;

        self.content = normalize_path(&root.join(&self.content));
        self.output = normalize_path(&root.join(&self.output));
        self.assets = normalize_path(&root.join(&self.assets));
    }

    /// Search index location inside the output directory.
    pub fn search_index_path(&self) -> PathBuf {
        self.output.join(&self.search.path)
    }

    /// Validate build configuration.
    ///
    /// # Checks
    /// - content directory exists
    /// - output is not the content directory
    /// - sitemap/search paths are relative
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::CONTENT,
                format!("content directory `{}` not found", self.content.display()),
                "create it or point `build.content` at your posts",
            );
        }

        if self.output == self.content {
            diag.error(Self::OUTPUT, "output directory must differ from content");
        }

        if self.sitemap.path.is_absolute() {
            diag.error(Self::SITEMAP_PATH, "must be relative to the output directory");
        }
        if self.search.path.is_absolute() {
            diag.error(Self::SEARCH_PATH, "must be relative to the output directory");
        }
    }
}
