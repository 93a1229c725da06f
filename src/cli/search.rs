//! Search command: run the search box filter against a built index.

use anyhow::Result;

use crate::cli::args::SearchArgs;
use crate::config::SiteConfig;
use crate::debug;
use crate::search::{SearchIndex, SearchOutcome, SearchRecord};
use crate::utils::plural_count;

/// Execute search command
pub fn run_search(args: &SearchArgs, config: &SiteConfig) -> Result<()> {
    let path = args
        .index
        .as_ref()
        .map_or_else(|| config.build.search_index_path(), |p| config.root_join(p));

    let index = SearchIndex::load(&path);
    debug!("search"; "{} in {}", plural_count(index.records.len(), "record"), path.display());

    let outcome = index.filter(&args.query);
    let output = format_outcome(&outcome, args.json)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Plain text mirrors what the search box shows; JSON lists matched records.
fn format_outcome(outcome: &SearchOutcome<'_>, json: bool) -> Result<String> {
    if !json {
        return Ok(outcome.to_string());
    }
    let records: &[&SearchRecord] = match outcome {
        SearchOutcome::Matches(records) => records,
        _ => &[],
    };
    Ok(serde_json::to_string_pretty(records)?)
}
