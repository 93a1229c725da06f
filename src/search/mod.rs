//! Search index and the query filter.
//!
//! The index is a flat JSON array written at build time and filtered in the
//! browser by `search.js`; [`filter`] is the same rule set in Rust, used by
//! `quire search`.
//!
//! | query length (chars) | outcome                               |
//! |----------------------|---------------------------------------|
//! | 0                    | [`SearchOutcome::Hidden`]             |
//! | 1..=2                | [`SearchOutcome::TooShort`]           |
//! | >= 3, no match       | [`SearchOutcome::NoResults`]          |
//! | >= 3, matches        | [`SearchOutcome::Matches`], in order  |

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{BuildMode, UrlPath};
use crate::debug;
use crate::generator::SitePlan;

/// Minimum query length, in characters, before matching runs.
pub const MIN_QUERY_LEN: usize = 3;

/// One searchable post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub path: UrlPath,
    pub title: String,
    pub description: String,
    #[serde(rename = "isDraft", default)]
    pub is_draft: bool,
}

impl SearchRecord {
    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        !self.is_draft
            && (self.title.to_lowercase().contains(needle)
                || self.description.to_lowercase().contains(needle))
    }
}

/// Result of running a query against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// Empty query: nothing is shown.
    Hidden,
    /// Fewer than [`MIN_QUERY_LEN`] characters.
    TooShort,
    /// No record matched; carries the query as typed.
    NoResults(String),
    /// Matching records in index order.
    Matches(Vec<&'a SearchRecord>),
}

impl fmt::Display for SearchOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => Ok(()),
            Self::TooShort => write!(f, "Please insert at least {MIN_QUERY_LEN} characters"),
            Self::NoResults(query) => write!(f, "No results for {query}"),
            Self::Matches(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}  {}", record.path, record.title)?;
                }
                Ok(())
            }
        }
    }
}

/// Filter `records` by `query`.
///
/// Drafts never match. The query is used as typed (no trimming); its length
/// is counted in characters.
pub fn filter<'a>(records: &'a [SearchRecord], query: &str) -> SearchOutcome<'a> {
    let len = query.chars().count();
    if len == 0 {
        return SearchOutcome::Hidden;
    }
    if len < MIN_QUERY_LEN {
        return SearchOutcome::TooShort;
    }

    let needle = query.to_lowercase();
    let matches: Vec<&SearchRecord> = records.iter().filter(|r| r.matches(&needle)).collect();

    if matches.is_empty() {
        SearchOutcome::NoResults(query.to_string())
    } else {
        SearchOutcome::Matches(matches)
    }
}

/// The serialized index: a JSON array of [`SearchRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    pub records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// One record per eligible post, in listing order.
    pub fn build(plan: &SitePlan, mode: BuildMode) -> Self {
        let records = plan
            .posts
            .iter()
            .map(|post| SearchRecord {
                path: post.path.clone(),
                title: post.title.clone(),
                description: post.description.clone(),
                is_draft: !mode.is_published(post.draft),
            })
            .collect();
        Self { records }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize search index")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write search index to {}", path.display()))
    }

    /// Read an index. A missing or unreadable index is an empty one.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            debug!("search"; "no index at {}", path.display());
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!("search"; "ignoring unreadable index {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn filter(&self, query: &str) -> SearchOutcome<'_> {
        filter(&self.records, query)
    }
}
