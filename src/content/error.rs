//! Content errors and the grouped report printed when a build fails.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use owo_colors::OwoColorize;
use thiserror::Error;

use crate::core::UrlPath;
use crate::utils::plural_s;

/// A problem with a single content file. All of these are fatal to a build.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read file: {0}")]
    Io(#[source] std::io::Error),

    #[error("no frontmatter found (expected a `---` or `+++` block at the top)")]
    MissingFrontmatter,

    #[error("invalid frontmatter: {0}")]
    InvalidFrontmatter(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` has invalid date `{value}` (expected YYYY-MM-DD[THH:MM:SS[Z]])")]
    InvalidDate { field: &'static str, value: String },

    #[error("`tags` is missing or empty")]
    MissingTags,

    #[error("tag `{tag}` is not in the category vocabulary")]
    UnknownTag { tag: String },

    #[error("declared path `{declared}` does not match derived slug `{derived}`")]
    SlugMismatch { declared: UrlPath, derived: UrlPath },

    #[error("route `{path}` is also produced by `{other}`")]
    DuplicateRoute { path: UrlPath, other: String },
}

/// Content errors grouped by source file (relative to the content dir).
#[derive(Debug, Default)]
pub struct ContentReport {
    files: BTreeMap<String, Vec<ContentError>>,
}

impl ContentReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: impl Into<String>, error: ContentError) {
        self.files.entry(source.into()).or_default().push(error);
    }

    pub fn extend(&mut self, source: impl Into<String>, errors: impl IntoIterator<Item = ContentError>) {
        let source = source.into();
        for error in errors {
            self.add(source.clone(), error);
        }
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: Self) {
        for (source, errors) in other.files {
            self.files.entry(source).or_default().extend(errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Count of files with errors.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total error count.
    pub fn error_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Errors recorded for one source file.
    pub fn errors_for(&self, source: &str) -> &[ContentError] {
        self.files.get(source).map_or(&[], Vec::as_slice)
    }

    /// Print the grouped report to stderr.
    pub fn print(&self) {
        if self.files.is_empty() {
            return;
        }
        eprintln!();

        let file_count = self.file_count();
        let error_count = self.error_count();
        eprintln!(
            "{} {}",
            "content".red().bold(),
            format!(
                "({file_count} file{}, {error_count} error{})",
                plural_s(file_count),
                plural_s(error_count)
            )
            .dimmed()
        );

        for (path, errs) in &self.files {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                eprintln!("{} {}", "→".red(), e);
            }
        }
    }

    /// `Ok(())` when empty, otherwise the report as an error.
    pub fn into_result(self) -> Result<(), ContentReportError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ContentReportError(self))
        }
    }
}

impl fmt::Display for ContentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )
        }
    }
}

/// Build-stopping wrapper, so a non-empty report can travel through `anyhow`.
#[derive(Debug, Error)]
#[error("content validation failed: {}", .0)]
pub struct ContentReportError(pub ContentReport);

/// Source label used as the report key for a content file.
pub fn source_label(path: &Path, content_dir: &Path) -> String {
    crate::utils::path::display_relative(path, content_dir)
}

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_groups_by_file() {
        let mut report = ContentReport::new();
        report.add("blog/a.md", ContentError::MissingTags);
        report.add(
            "blog/a.md",
            ContentError::UnknownTag { tag: "rust".into() },
        );
        report.add("blog/b.md", ContentError::MissingField("title"));

        assert_eq!(report.file_count(), 2);
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.errors_for("blog/a.md").len(), 2);
        assert!(report.errors_for("blog/c.md").is_empty());
    }

    #[test]
    fn test_slug_mismatch_reports_both_paths() {
        let err = ContentError::SlugMismatch {
            declared: UrlPath::from_page("/blog/foo"),
            derived: UrlPath::from_page("/blog/bar"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/blog/foo/"));
        assert!(msg.contains("/blog/bar/"));
    }

    #[test]
    fn test_into_result() {
        assert!(ContentReport::new().into_result().is_ok());

        let mut report = ContentReport::new();
        report.add("index.md", ContentError::MissingFrontmatter);
        let err = report.into_result().unwrap_err();
        assert_eq!(err.0.error_count(), 1);
    }
}
