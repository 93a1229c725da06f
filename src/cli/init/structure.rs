//! Blog directory structure creation.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Standard blog directory structure.
const SITE_DIRS: &[&str] = &["content/blog", "assets/images"];

const SAMPLE_POST_PATH: &str = "content/blog/hello-world.md";

const SAMPLE_POST: &str = r#"---
title: Hello, world
description: The first post of a new blog.
date: 2024-01-01
tags:
  - github
draft: false
---

Posts live under `content/`. The file location decides the route, so this
file is served at `/blog/hello-world/`.

Tags must come from `[blog] categories` in `quire.toml`.
"#;

/// Create blog directory structure at the given root.
pub fn create_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}

/// Write the sample post unless one already exists.
pub fn write_sample_post(root: &Path) -> Result<()> {
    let path = root.join(SAMPLE_POST_PATH);
    if !path.exists() {
        fs::write(&path, SAMPLE_POST)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_structure() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_blog");

        create_structure(&root).unwrap();
        write_sample_post(&root).unwrap();

        assert!(root.join("content/blog").is_dir());
        assert!(root.join("assets/images").is_dir());
        assert!(root.join(SAMPLE_POST_PATH).is_file());
    }

    #[test]
    fn test_sample_post_not_overwritten() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();
        let path = temp.path().join(SAMPLE_POST_PATH);
        fs::write(&path, "mine").unwrap();

        write_sample_post(temp.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "mine");
    }
}
