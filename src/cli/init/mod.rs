//! Blog initialization.
//!
//! - [`validate`]: target directory checks
//! - [`structure`]: directories and the sample post
//! - [`config`]: `quire.toml` and ignore files

mod config;
mod structure;
mod validate;

use anyhow::Result;

use crate::{config::SiteConfig, log};

pub use validate::InitMode;

/// Create a new blog at `site_config.root`.
///
/// With `dry_run`, only prints the config template to stdout.
pub fn new_site(site_config: &SiteConfig, has_name: bool, dry_run: bool) -> Result<()> {
    let root = &site_config.root;
    let title = site_title(site_config);

    if dry_run {
        print!("{}", config::generate_config_template(&title));
        return Ok(());
    }

    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };
    validate::validate_target(root, mode)?;

    structure::create_structure(root)?;
    structure::write_sample_post(root)?;
    config::write_config(root, &site_config.config_path, &title)?;
    config::write_ignore_files(root, "public")?;

    log!("init"; "blog initialized at {}", root.display());
    Ok(())
}

/// Initial `site.title`: the directory name.
fn site_title(config: &SiteConfig) -> String {
    config
        .root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "My Blog".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build::build_site;
    use crate::core::BuildMode;
    use tempfile::TempDir;

    #[test]
    fn test_new_site_builds() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my-blog");

        let mut config = SiteConfig::default();
        config.config_path = root.join("quire.toml");
        config.root = root.clone();
        new_site(&config, true, false).unwrap();

        let written = std::fs::read_to_string(root.join("quire.toml")).unwrap();
        let mut parsed = SiteConfig::from_str(&written).unwrap();
        assert_eq!(parsed.site.title, "my-blog");

        parsed.root = root.clone();
        parsed.build.normalize(&root);
        parsed.validate().unwrap();

        let plan = build_site(&parsed, BuildMode::PRODUCTION, true).unwrap();
        assert_eq!(plan.posts.len(), 1);
        assert!(root.join("public/blog/hello-world/index.html").is_file());
    }

    #[test]
    fn test_new_site_refuses_existing_dir() {
        let temp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.root = temp.path().to_path_buf();
        config.config_path = temp.path().join("quire.toml");
        assert!(new_site(&config, true, false).is_err());
    }
}
