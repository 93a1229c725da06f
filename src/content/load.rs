//! Content discovery and parallel parsing.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;

use super::{ContentReport, Post, source_label};

const IGNORED_FILES: &[&str] = &[".DS_Store"];
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Collect markdown files below `dir`, sorted for deterministic reports.
///
/// Hidden files and directories are skipped.
pub fn collect_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .filter(|p| is_markdown(p))
        .collect();
    files.sort();
    files
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

/// Result of loading the content directory.
#[derive(Debug, Default)]
pub struct LoadedContent {
    /// Posts that passed schema checks, in file order.
    pub posts: Vec<Post>,
    /// Schema errors from files that did not parse.
    pub report: ContentReport,
}

/// Read and parse every post below `content_dir` in parallel.
pub fn load_posts(content_dir: &Path) -> LoadedContent {
    let files = collect_markdown_files(content_dir);

    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            let label = source_label(file, content_dir);
            let relative = file.strip_prefix(content_dir).unwrap_or(file);
            let parsed = std::fs::read_to_string(file)
                .map_err(|e| vec![e.into()])
                .and_then(|content| Post::parse(relative, &content));
            (label, parsed)
        })
        .collect();

    let mut loaded = LoadedContent::default();
    for (label, parsed) in results {
        match parsed {
            Ok(post) => {
                if !post.extra.is_empty() {
                    let keys: Vec<_> = post.extra.keys().map(String::as_str).collect();
                    crate::debug!("content"; "{}: ignoring {}", label, keys.join(", "));
                }
                loaded.posts.push(post);
            }
            Err(errors) => loaded.report.extend(label, errors),
        }
    }

    crate::debug!("content"; "parsed {} of {} files", loaded.posts.len(), files.len());
    loaded
}
