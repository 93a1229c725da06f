//! A parsed post: frontmatter checked against the post schema, body rendered.

use std::path::Path;

use serde_json::{Map, Value};

use super::{ContentError, PostMeta, derive_slug, frontmatter};
use crate::core::UrlPath;
use crate::render::markdown::{self, MarkdownOptions};
use crate::utils::date::DateTimeUtc;

/// One content file after schema checks.
#[derive(Debug, Clone)]
pub struct Post {
    /// Source path relative to the content directory (report key).
    pub label: String,
    /// Route derived from the file location.
    pub slug: UrlPath,
    /// Declared route (`path` frontmatter), defaulting to `slug`.
    pub path: UrlPath,
    pub title: String,
    pub description: String,
    pub date: DateTimeUtc,
    pub updated: Option<DateTimeUtc>,
    /// Tags as written; vocabulary checks happen in the generator.
    pub tags: Vec<String>,
    pub draft: bool,
    pub featured_image: Option<String>,
    pub image_description: Option<String>,
    /// Frontmatter keys outside the post schema. Nothing renders them; the
    /// loader lists them in verbose output.
    pub extra: Map<String, Value>,
    /// Rendered markdown body.
    pub html: String,
}

impl Post {
    /// Parse a content file. `relative` is the path below the content dir.
    ///
    /// Returns every schema problem found in the file, not just the first.
    pub fn parse(relative: &Path, content: &str) -> Result<Self, Vec<ContentError>> {
        let (fields, body) = frontmatter::extract(content).map_err(|e| vec![e])?;
        let meta = PostMeta::from_fields(fields)?;
        Self::from_meta(relative, meta, body)
    }

    fn from_meta(
        relative: &Path,
        meta: PostMeta,
        body: &str,
    ) -> Result<Self, Vec<ContentError>> {
        let mut errors = Vec::new();

        let title = required(meta.title, "title", &mut errors);
        let description = required(meta.description, "description", &mut errors);
        let date = required(meta.date, "date", &mut errors)
            .and_then(|raw| parse_date("date", raw, &mut errors));
        let updated = meta
            .updated
            .and_then(|raw| parse_date("updated", raw, &mut errors));

        let (Some(title), Some(description), Some(date)) = (title, description, date) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let slug = derive_slug(relative);
        let path = meta
            .path
            .as_deref()
            .map_or_else(|| slug.clone(), UrlPath::from_page);

        Ok(Self {
            label: relative.to_string_lossy().replace('\\', "/"),
            slug,
            path,
            title,
            description,
            date,
            updated,
            tags: meta.tags.unwrap_or_default(),
            draft: meta.draft,
            featured_image: meta.featured_image,
            image_description: meta.image_description,
            extra: meta.extra,
            html: markdown::to_html(body, &MarkdownOptions::all()),
        })
    }

    /// Date shown and sorted on: the publication date.
    pub fn display_date(&self) -> String {
        self.date.to_display()
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    errors: &mut Vec<ContentError>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(ContentError::MissingField(field));
            None
        }
    }
}

fn parse_date(
    field: &'static str,
    raw: String,
    errors: &mut Vec<ContentError>,
) -> Option<DateTimeUtc> {
    let parsed = DateTimeUtc::parse(&raw);
    if parsed.is_none() {
        errors.push(ContentError::InvalidDate { field, value: raw });
    }
    parsed
}
