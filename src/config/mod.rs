//! Site configuration management for `quire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── blog       # [blog]
//! │   ├── build      # [build], [build.sitemap], [build.search]
//! │   ├── serve      # [serve]
//! │   └── site       # [site]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config discovery, URL joining
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

pub use util::join_site_url;
use util::find_config_file;

pub use section::{BlogConfig, BuildSectionConfig, ServeConfig, SiteSectionConfig, Theme};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// The project root is determined by the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        if let Commands::Init { name, .. } = &cli.command {
            let root = name.as_ref().map_or_else(|| cwd.clone(), |n| cwd.join(n));
            let mut config = Self::default();
            config.config_path = root.join(&cli.config);
            config.root = root;
            return Ok(config);
        }

        let config_path =
            find_config_file(&cli.config).ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = crate::utils::path::normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Finalize configuration after loading: resolve paths, apply CLI flags.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = crate::utils::path::normalize_path(&root);

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        let root = self.root.clone();
        self.build.normalize(&root);

        self.apply_command_options(cli);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Init { .. } | Commands::Validate { .. } | Commands::Search { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        self.build.clean = args.clean;
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        Self::update_option(&mut self.blog.posts_per_page, args.posts_per_page.as_ref());
        if let Some(url) = &args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration. Collects all errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnostics();
        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    fn diagnostics(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.blog.validate(&mut diag);
        self.build.validate(&mut diag);

        if self.build.sitemap.enable && self.site.url.is_none() {
            diag.error_with_hint(
                SiteSectionConfig::URL,
                "`build.sitemap.enable` is set but `site.url` is not configured",
                "set `site.url` or pass `--site-url`",
            );
        }

        diag
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a config rooted at `root` with normalized paths, as `load` would.
#[cfg(test)]
pub fn test_config_at(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(extra);
    config.root = root.to_path_buf();
    config.config_path = root.join("quire.toml");
    config.build.normalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\ntitle = \"My Blog\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert_eq!(config.blog.posts_per_page, 5);
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\n[blog]\nposts_per_page = 3";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_sitemap_requires_url() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("content")).unwrap();

        let config = test_config_at(dir.path(), "[build.sitemap]\nenable = true");
        let diag = config.diagnostics();
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, SiteSectionConfig::URL);

        let config = test_config_at(
            dir.path(),
            "url = \"https://example.com\"\n[build.sitemap]\nenable = true",
        );
        assert!(!config.diagnostics().has_errors());
    }

    #[test]
    fn test_root_relative() {
        let mut config = SiteConfig::default();
        config.root = PathBuf::from("/site");
        assert_eq!(
            config.root_relative("/site/content/blog/a.md"),
            PathBuf::from("content/blog/a.md")
        );
        assert_eq!(config.root_join("public"), PathBuf::from("/site/public"));
    }
}
