//! Typed post metadata built from raw frontmatter fields.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{ContentError, frontmatter::Fields};

/// Frontmatter of one post, before schema checks.
///
/// Every field is optional here; [`Post`](super::Post) decides which ones are
/// required. Unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `date` or `pubDate`
    pub date: Option<String>,
    /// `updated` or `updatedDate`
    pub updated: Option<String>,
    /// Declared route; defaults to the slug derived from the file location.
    pub path: Option<String>,
    /// `None` when the key is absent, `Some(vec![])` when present but empty.
    pub tags: Option<Vec<String>>,
    pub draft: bool,
    /// `featuredImage` or `heroImage`
    pub featured_image: Option<String>,
    pub image_description: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl PostMeta {
    /// Build metadata from frontmatter, collecting every type error.
    pub fn from_fields(fields: Fields) -> Result<Self, Vec<ContentError>> {
        let mut meta = Self::default();
        let mut errors = Vec::new();

        for (key, value) in fields {
            let result = match key.as_str() {
                "title" => string_field("title", value).map(|v| meta.title = v),
                "description" => string_field("description", value).map(|v| meta.description = v),
                "date" | "pubDate" => string_field("date", value).map(|v| meta.date = v),
                "updated" | "updatedDate" => string_field("updated", value).map(|v| meta.updated = v),
                "path" => string_field("path", value).map(|v| meta.path = v),
                "tags" => tags_field(value).map(|v| meta.tags = v),
                "draft" => bool_field("draft", value).map(|v| meta.draft = v),
                "featuredImage" | "heroImage" => {
                    string_field("featuredImage", value).map(|v| meta.featured_image = v)
                }
                "imageDescription" => {
                    string_field("imageDescription", value).map(|v| meta.image_description = v)
                }
                _ => {
                    meta.extra.insert(key, value);
                    Ok(())
                }
            };
            if let Err(e) = result {
                errors.push(e);
            }
        }

        if errors.is_empty() { Ok(meta) } else { Err(errors) }
    }
}

fn string_field(field: &'static str, value: Value) -> Result<Option<String>, ContentError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ContentError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn bool_field(field: &'static str, value: Value) -> Result<bool, ContentError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(ContentError::InvalidField {
            field,
            expected: "true or false",
        }),
    }
}

/// Tags as a list; a plain string is read as a comma-separated list.
fn tags_field(value: Value) -> Result<Option<Vec<String>>, ContentError> {
    const INVALID: ContentError = ContentError::InvalidField {
        field: "tags",
        expected: "a list of strings",
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(INVALID),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Err(INVALID),
    }
}
