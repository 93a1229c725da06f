//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Load** - Discover and parse posts in parallel
//! - **Plan** - Content rules, draft gate, sort, listings and categories
//! - **Init** - Clean (with `--clean`) and create the output directory
//! - **Render** - Write every route in parallel
//! - **Finalize** - 404 page, search index, embedded assets, user assets, sitemap
//!
//! Nothing is written when the plan fails.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::{
    config::SiteConfig,
    content::{ContentReport, ContentReportError, load_posts},
    core::BuildMode,
    embed::assets::{SearchJsVars, write_embedded_assets},
    generator::{SitePlan, plan_site, sitemap::Sitemap},
    log,
    logger::ProgressLine,
    render::{RenderContext, Route},
    search::{MIN_QUERY_LEN, SearchIndex},
    utils::{path::display_relative, plural_count},
};

/// Load every post and plan the site. All content errors are returned
/// together, schema errors and rule violations alike.
pub fn plan_content(config: &SiteConfig, mode: BuildMode) -> Result<SitePlan, ContentReport> {
    let loaded = load_posts(&config.build.content);
    let mut report = loaded.report;

    match plan_site(loaded.posts, config, mode) {
        Ok(plan) if report.is_empty() => Ok(plan),
        Ok(_) => Err(report),
        Err(rules) => {
            report.merge(rules);
            Err(report)
        }
    }
}

/// Build the entire site.
///
/// Pipeline: load -> plan -> init -> render -> finalize
pub fn build_site(config: &SiteConfig, mode: BuildMode, quiet: bool) -> Result<SitePlan> {
    let plan = match plan_content(config, mode) {
        Ok(plan) => plan,
        Err(report) => {
            if !quiet {
                report.print();
            }
            return Err(ContentReportError(report).into());
        }
    };

    if !quiet && plan.skipped_drafts > 0 {
        log!("build"; "{} skipped", plural_count(plan.skipped_drafts, "draft"));
    }

    init_output(config)?;

    let ctx = RenderContext::new(config, &plan);
    render_routes(&ctx, &config.build.output, quiet)?;
    finalize_build(&ctx, mode)?;

    if !quiet {
        log!(
            "build";
            "{} written to {}",
            plural_count(plan.route_count(), "page"),
            display_relative(&config.build.output, &config.root)
        );
    }

    Ok(plan)
}

/// Create the output directory, removing it first with `--clean`.
fn init_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output).with_context(|| format!("failed to create {}", output.display()))
}

/// Render and write all routes in parallel.
fn render_routes(ctx: &RenderContext<'_>, output: &Path, quiet: bool) -> Result<()> {
    let routes = ctx.routes();
    let progress = (!quiet).then(|| create_progress(&routes));

    routes.par_iter().try_for_each(|route| -> Result<()> {
        let path = route.path(ctx.plan).output_file(output);
        write_file(&path, ctx.render(route).as_bytes())?;
        if let Some(p) = &progress {
            p.inc(route.kind());
        }
        Ok(())
    })?;

    if let Some(p) = progress {
        p.finish();
    }
    Ok(())
}

fn create_progress(routes: &[Route<'_>]) -> ProgressLine {
    let count = |kind: &str| routes.iter().filter(|r| r.kind() == kind).count();
    ProgressLine::new(&[
        ("posts", count("posts")),
        ("listings", count("listings")),
        ("categories", count("categories")),
        ("pages", count("pages")),
    ])
}

/// Everything written after the routes.
fn finalize_build(ctx: &RenderContext<'_>, mode: BuildMode) -> Result<()> {
    let config = ctx.config;
    let output = &config.build.output;

    write_file(&output.join("404.html"), ctx.render_not_found().as_bytes())?;

    let search = ctx.search_url().map(|index_url| SearchJsVars {
        index_url,
        min_length: MIN_QUERY_LEN,
    });
    if search.is_some() {
        SearchIndex::build(ctx.plan, mode).write(&config.build.search_index_path())?;
    }
    write_embedded_assets(output, search.as_ref())?;

    copy_assets(&config.build.assets, output)?;

    if config.build.sitemap.enable
        && let Some(url) = &config.site.url
    {
        Sitemap::build(ctx.plan, url).write(&output.join(&config.build.sitemap.path))?;
    }

    Ok(())
}

/// Copy the user asset directory verbatim into the output root.
fn copy_assets(assets: &Path, output: &Path) -> Result<()> {
    if !assets.is_dir() {
        return Ok(());
    }

    let files: Vec<_> = WalkDir::new(assets)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect();

    files.par_iter().try_for_each(|file| -> Result<()> {
        let relative = file.strip_prefix(assets).unwrap_or(file);
        let dest = output.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(file, &dest)
            .with_context(|| format!("failed to copy {}", file.display()))?;
        Ok(())
    })?;

    crate::debug!("build"; "copied {}", plural_count(files.len(), "asset"));
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::search::{SearchOutcome, filter};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(title: &str, date: &str, tags: &str, draft: bool) -> String {
        format!(
            "---\ntitle: {title}\ndescription: Notes on {title}\ndate: {date}\ntags: {tags}\ndraft: {draft}\n---\n# {title}\n"
        )
    }

    fn site(extra: &str) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "content/blog/docker-ci.md", &post("Docker in CI", "2022-07-08", "[docker, circleci]", false));
        write(root, "content/blog/aws-lambda.md", &post("AWS Lambda", "2022-05-01", "[aws]", false));
        write(root, "content/blog/wip.md", &post("Work in progress", "2022-08-01", "[golang]", true));
        write(root, "assets/img/logo.png", "png");
        let config = test_config_at(root, extra);
        (dir, config)
    }

    #[test]
    fn test_build_production() {
        let (_dir, config) = site("");
        let plan = build_site(&config, BuildMode::PRODUCTION, true).unwrap();
        let out = &config.build.output;

        assert_eq!(plan.posts.len(), 2);
        assert!(out.join("blog/index.html").is_file());
        assert!(out.join("blog/docker-ci/index.html").is_file());
        assert!(!out.join("blog/wip/index.html").exists());
        assert!(out.join("categories/index.html").is_file());
        assert!(out.join("categories/ci-cd/index.html").is_file());
        assert!(out.join("index.html").is_file());
        assert!(out.join("404.html").is_file());
        assert!(out.join("assets/quire.css").is_file());
        assert!(out.join("assets/search.js").is_file());
        assert!(out.join("img/logo.png").is_file());
        assert!(!out.join("sitemap.xml").exists());

        let docker = fs::read_to_string(out.join("categories/docker/index.html")).unwrap();
        assert!(docker.contains("Docker in CI"));
        assert!(!docker.contains("AWS Lambda"));

        let index = SearchIndex::load(&config.build.search_index_path());
        assert_eq!(index.records.len(), 2);
        assert!(matches!(filter(&index.records, "progress"), SearchOutcome::NoResults(_)));
    }

    #[test]
    fn test_build_development_includes_drafts() {
        let (_dir, config) = site("");
        build_site(&config, BuildMode::DEVELOPMENT, true).unwrap();
        let out = &config.build.output;

        assert!(out.join("blog/wip/index.html").is_file());
        let index = SearchIndex::load(&config.build.search_index_path());
        assert_eq!(index.records.len(), 3);
        assert!(matches!(index.filter("progress"), SearchOutcome::Matches(m) if m.len() == 1));
    }

    #[test]
    fn test_build_fails_without_writing() {
        let (dir, config) = site("");
        write(dir.path(), "content/blog/rusty.md", &post("Rust", "2022-01-01", "[rust]", false));
        write(dir.path(), "content/blog/broken.md", "no frontmatter here");

        let err = build_site(&config, BuildMode::PRODUCTION, true).unwrap_err();
        let report = &err.downcast_ref::<ContentReportError>().unwrap().0;
        assert_eq!(report.file_count(), 2);
        assert!(!config.build.output.exists());
    }

    #[test]
    fn test_build_sitemap_and_clean() {
        let (_dir, mut config) = site("url = \"https://example.com\"\n[build.sitemap]\nenable = true");
        let stale = config.build.output.join("stale.html");
        write(&config.build.output, "stale.html", "old");

        config.build.clean = true;
        build_site(&config, BuildMode::PRODUCTION, true).unwrap();

        assert!(!stale.exists());
        let xml = fs::read_to_string(config.build.output.join("sitemap.xml")).unwrap();
        assert!(xml.contains("<loc>https://example.com/blog/docker-ci/</loc>"));
    }

    #[test]
    fn test_build_without_search() {
        let (_dir, config) = site("[build.search]\nenable = false");
        build_site(&config, BuildMode::PRODUCTION, true).unwrap();
        assert!(!config.build.search_index_path().exists());
        assert!(!config.build.output.join("assets/search.js").exists());
    }
}
