//! `[site]` configuration.
//!
//! Basic site information rendered into every page, plus the theme.
//!
//! ```toml
//! [site]
//! title = "harrisoncramer.me"
//! description = "Notes on infrastructure and tooling"
//! author = "Harrison Cramer"
//! url = "https://www.harrisoncramer.me"
//! language = "en"
//! theme = "auto"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Color theme written to `<html data-theme>`.
///
/// Passed explicitly to rendering; `auto` lets the stylesheet follow
/// `prefers-color-scheme`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

/// Site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title (header, `<title>` suffix).
    pub title: String,

    /// Site description (`<meta name="description">` on listings).
    pub description: String,

    /// Author name (footer).
    pub author: String,

    /// Absolute site URL, required for the sitemap.
    pub url: Option<String>,

    /// Language code (e.g., "en").
    pub language: String,

    /// Color theme.
    pub theme: Theme,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            url: None,
            language: "en".into(),
            theme: Theme::Auto,
        }
    }
}

impl SiteSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` should not be empty (warning)
    /// - `url`, when set, must be an absolute `http(s)` URL
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn(Self::TITLE, "site title is empty");
        }

        if let Some(url) = &self.url {
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => diag.error(
                    Self::URL,
                    format!("unsupported scheme `{}` in `{url}`", parsed.scheme()),
                ),
                Err(e) => diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL `{url}`: {e}"),
                    "use an absolute URL such as \"https://example.com\"",
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.language, "en");
        assert_eq!(config.site.theme, Theme::Auto);
        assert!(config.site.url.is_none());
    }

    #[test]
    fn test_theme_parse() {
        let config = test_parse_config("theme = \"dark\"");
        assert_eq!(config.site.theme, Theme::Dark);
        assert_eq!(config.site.theme.as_str(), "dark");
    }

    #[test]
    fn test_validate_url() {
        let mut site = SiteSectionConfig::default();
        site.title = "Blog".into();

        site.url = Some("https://example.com".into());
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert!(!diag.has_errors());

        site.url = Some("ftp://example.com".into());
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert_eq!(diag.len(), 1);

        site.url = Some("example.com".into());
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
