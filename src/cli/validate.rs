//! Content validation command.
//!
//! Runs the same load and planning steps as `build` without writing anything,
//! then prints the grouped report.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::SiteConfig;
use crate::content::{ContentReportError, collect_markdown_files};
use crate::core::BuildMode;
use crate::log;
use crate::utils::plural_count;

use super::build::plan_content;

/// Validate tags, slugs and frontmatter of every post.
pub fn validate_site(config: &SiteConfig, mode: BuildMode) -> Result<()> {
    let file_count = collect_markdown_files(&config.build.content).len();
    if file_count == 0 {
        log!("validate"; "no content files found");
        return Ok(());
    }

    log!(
        "validate";
        "validating {}{}",
        plural_count(file_count, "file"),
        if mode.is_dev() { " (development)" } else { "" }
    );

    match plan_content(config, mode) {
        Ok(plan) => {
            log!(
                "validate";
                "{}, {} across {}",
                plural_count(plan.posts.len(), "post"),
                plural_count(plan.categories.len(), "category"),
                plural_count(plan.listings.len(), "listing page")
            );
            log!("validate"; "{}", "all checks passed".green());
            Ok(())
        }
        Err(report) => {
            report.print();
            eprintln!();
            log!("validate"; "{}", report);
            Err(ContentReportError(report).into())
        }
    }
}
