//! Configuration file generation.
//!
//! Creates `quire.toml` and ignore files for new blogs.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::{BlogConfig, BuildSectionConfig, ServeConfig, Theme};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Generate `quire.toml` content with comments, using the built-in defaults.
pub fn generate_config_template(title: &str) -> String {
    let blog = BlogConfig::default();
    let build = BuildSectionConfig::default();
    let serve = ServeConfig::default();
    let categories = blog
        .categories
        .iter()
        .map(|c| format!("    {c:?},"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# quire configuration file (v{version})

[site]
title = {title:?}
description = "Notes and write-ups"
author = ""
# url = "https://example.com"   # required for the sitemap
language = "en"
theme = "{theme}"               # light | dark | auto

[blog]
root = "{root}"
posts_per_page = {ppp}
categories_root = "{categories_root}"
# Closed tag vocabulary: a post with any other tag fails the build.
categories = [
{categories}
]

[build]
content = "{content}"
output = "{output}"
assets = "{assets}"

[build.sitemap]
enable = {sitemap}
path = "{sitemap_path}"

[build.search]
enable = {search}
path = "{search_path}"

[serve]
interface = "{interface}"
port = {port}
"#,
        version = env!("CARGO_PKG_VERSION"),
        theme = Theme::default().as_str(),
        root = blog.root,
        ppp = blog.posts_per_page,
        categories_root = blog.categories_root,
        content = build.content.display(),
        output = build.output.display(),
        assets = build.assets.display(),
        sitemap = build.sitemap.enable,
        sitemap_path = build.sitemap.path.display(),
        search = build.search.enable,
        search_path = build.search.path.display(),
        interface = serve.interface,
        port = serve.port,
    )
}

/// Write the config template to `path`.
pub fn write_config(root: &Path, path: &Path, title: &str) -> Result<()> {
    let path = root.join(path);
    fs::write(&path, generate_config_template(title))
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// Write .gitignore and .ignore files ignoring the output directory.
pub fn write_ignore_files(root: &Path, output_dir: &str) -> Result<()> {
    let content = format!("/{output_dir}/\n.DS_Store\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Keep user ignore files
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template("Quoted \"title\"");
        let config = SiteConfig::from_str(&template).unwrap();

        assert_eq!(config.site.title, "Quoted \"title\"");
        assert_eq!(config.blog.categories, BlogConfig::default().categories);
        assert!(config.blog.categories.iter().any(|c| c == "ci/cd"));
        assert_eq!(config.blog.posts_per_page, 5);
        assert!(config.build.search.enable);
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_write_ignore_files() {
        let temp = TempDir::new().unwrap();
        write_ignore_files(temp.path(), "public").unwrap();

        let content = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert!(content.contains("/public/"));
    }

    #[test]
    fn test_ignore_files_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        fs::write(&gitignore, "custom content").unwrap();

        write_ignore_files(temp.path(), "public").unwrap();
        assert_eq!(fs::read_to_string(&gitignore).unwrap(), "custom content");
    }
}
