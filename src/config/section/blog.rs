//! `[blog]` section: listing roots, page size and the tag vocabulary.
//!
//! ```toml
//! [blog]
//! root = "/blog/"                  # listing root, page 0
//! posts_per_page = 5
//! categories_root = "/categories/"
//! categories = ["aws", "docker", "ci/cd"]
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::content::slugify;
use crate::core::UrlPath;

/// Tag vocabulary used when `[blog] categories` is not set.
pub const DEFAULT_CATEGORIES: [&str; 15] = [
    "aws",
    "circleci",
    "docker",
    "javascript",
    "typescript",
    "microservices",
    "react",
    "terraform",
    "kubernetes",
    "ci/cd",
    "github",
    "neovim",
    "debugging",
    "golang",
    "astro",
];

/// Listing and category settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Route of listing page 0. Later pages live at `{root}{n}/`.
    pub root: String,

    /// Posts per listing page (page 0 counts its featured post).
    pub posts_per_page: usize,

    /// Parent route of the per-category listings.
    pub categories_root: String,

    /// Closed tag vocabulary, in display order.
    pub categories: Vec<String>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            root: "/blog/".into(),
            posts_per_page: 5,
            categories_root: "/categories/".into(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl BlogConfig {
    pub const ROOT: FieldPath = FieldPath::new("blog.root");
    pub const POSTS_PER_PAGE: FieldPath = FieldPath::new("blog.posts_per_page");
    pub const CATEGORIES_ROOT: FieldPath = FieldPath::new("blog.categories_root");
    pub const CATEGORIES: FieldPath = FieldPath::new("blog.categories");

    /// Listing root as a route.
    pub fn root_url(&self) -> UrlPath {
        UrlPath::from_page(&self.root)
    }

    /// Category root as a route.
    pub fn categories_url(&self) -> UrlPath {
        UrlPath::from_page(&self.categories_root)
    }

    /// The vocabulary as a set for membership checks.
    pub fn vocabulary(&self) -> FxHashSet<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    /// Validate blog configuration.
    ///
    /// # Checks
    /// - `posts_per_page >= 1`
    /// - vocabulary is non-empty, entries are non-blank
    /// - duplicate vocabulary entries (warning)
    /// - every entry slugifies to a distinct, non-empty route segment
    /// - both roots start and end with `/`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.posts_per_page == 0 {
            diag.error(Self::POSTS_PER_PAGE, "must be at least 1");
        }

        if self.categories.is_empty() {
            diag.error_with_hint(
                Self::CATEGORIES,
                "tag vocabulary is empty, every post would fail validation",
                "remove the key to use the default vocabulary",
            );
        }

        let mut seen = FxHashSet::default();
        let mut routes: FxHashMap<String, &str> = FxHashMap::default();
        for category in &self.categories {
            if category.trim().is_empty() {
                diag.error(Self::CATEGORIES, "contains a blank entry");
                continue;
            }
            if !seen.insert(category.as_str()) {
                diag.warn(Self::CATEGORIES, format!("duplicate entry `{category}`"));
                continue;
            }

            let slug = slugify(category);
            if slug.is_empty() {
                diag.error_with_hint(
                    Self::CATEGORIES,
                    format!("`{category}` has no letters or digits to build a route from"),
                    "use an alphanumeric category name",
                );
            } else if let Some(other) = routes.get(&slug) {
                let route = self.categories_url().join(&slug);
                diag.error(
                    Self::CATEGORIES,
                    format!("`{category}` and `{other}` both map to `{route}`"),
                );
            } else {
                routes.insert(slug, category);
            }
        }

        for (field, value) in [
            (Self::ROOT, &self.root),
            (Self::CATEGORIES_ROOT, &self.categories_root),
        ] {
            if !value.starts_with('/') || !value.ends_with('/') {
                diag.error_with_hint(
                    field,
                    format!("`{value}` must start and end with `/`"),
                    format!("use \"/{}/\"", value.trim_matches('/')),
                );
            }
        }

        if self.root_url() == self.categories_url() {
            diag.error(
                Self::CATEGORIES_ROOT,
                "must differ from `blog.root`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_blog_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.blog.root, "/blog/");
        assert_eq!(config.blog.posts_per_page, 5);
        assert_eq!(config.blog.categories.len(), 15);
        assert!(config.blog.vocabulary().contains("ci/cd"));
        assert!(!config.blog.vocabulary().contains("rust"));
    }

    #[test]
    fn test_blog_override() {
        let config = test_parse_config(
            "[blog]\nposts_per_page = 10\ncategories = [\"rust\", \"wasm\"]",
        );
        assert_eq!(config.blog.posts_per_page, 10);
        assert_eq!(config.blog.categories, vec!["rust", "wasm"]);
        assert_eq!(config.blog.root, "/blog/");
    }

    #[test]
    fn test_validate_defaults_ok() {
        let mut diag = ConfigDiagnostics::new();
        BlogConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_validate_errors() {
        let blog = BlogConfig {
            root: "blog".into(),
            posts_per_page: 0,
            categories_root: "/categories/".into(),
            categories: vec![],
        };
        let mut diag = ConfigDiagnostics::new();
        blog.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_validate_duplicate_is_warning() {
        let blog = BlogConfig {
            categories: vec!["aws".into(), "aws".into()],
            ..BlogConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        blog.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_validate_colliding_slugs() {
        let blog = BlogConfig {
            categories: vec!["ci/cd".into(), "ci-cd".into(), "++".into()],
            ..BlogConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        blog.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
        assert!(diag.errors()[0].message.contains("/categories/ci-cd/"));
        assert!(diag.errors()[1].message.contains("`++`"));
    }
}
