//! Frontmatter extraction from YAML-like (`---`) or TOML (`+++`) blocks.
//!
//! Both syntaxes are lowered into one JSON object so field handling in
//! [`PostMeta`](super::PostMeta) never cares which one a post used.

use serde_json::{Map, Value};

use super::ContentError;

/// Raw frontmatter fields, keys as written.
pub type Fields = Map<String, Value>;

/// Split `content` into frontmatter fields and the markdown body.
pub fn extract(content: &str) -> Result<(Fields, &str), ContentError> {
    let (block, body, is_toml) = detect(content).ok_or(ContentError::MissingFrontmatter)?;
    let fields = if is_toml {
        parse_toml(block)?
    } else {
        parse_yaml_like(block)
    };
    Ok((fields, body))
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && rest.starts_with(['\n', '\r'])
        {
            let closing = format!("\n{fence}");
            let end = rest.find(&closing)?;
            let block = rest[..end].trim();
            let after = &rest[end + closing.len()..];
            // Remainder of the closing fence line
            let body = after.split_once('\n').map_or("", |(_, body)| body);
            return Some((block, body.trim_start_matches(['\r', '\n']), is_toml));
        }
    }

    None
}

/// Parse TOML frontmatter. Datetimes become their string form.
fn parse_toml(block: &str) -> Result<Fields, ContentError> {
    let table: toml::Table =
        toml::from_str(block).map_err(|e| ContentError::InvalidFrontmatter(e.message().to_string()))?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Parse YAML-like frontmatter.
///
/// Supports `key: value` lines, inline arrays, and block lists:
///
/// ```text
/// tags:
///   - docker
///   - aws
/// ```
fn parse_yaml_like(block: &str) -> Fields {
    let mut fields = Fields::new();
    let mut list_key: Option<String> = None;

    for raw in block.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(item) = line.strip_prefix('-')
            && let Some(key) = &list_key
        {
            if let Some(Value::Array(items)) = fields.get_mut(key) {
                items.push(Value::String(unquote(item.trim()).to_string()));
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        if value.is_empty() {
            fields.insert(key.clone(), Value::Array(Vec::new()));
            list_key = Some(key);
        } else {
            fields.insert(key, parse_yaml_value(value));
            list_key = None;
        }
    }

    // `key:` with no following items is an empty value, not a list
    fields
        .into_iter()
        .map(|(k, v)| match v {
            Value::Array(items) if items.is_empty() => (k, Value::Null),
            other => (k, other),
        })
        .collect()
}

/// Parse a YAML-like scalar or inline array.
///
/// - Quoted strings: `"a: b"`, `'x'`
/// - Inline arrays: `[a, "b"]`
/// - Booleans, `null`/`~`, integers, floats
/// - Strings: everything else (commas are kept)
fn parse_yaml_value(s: &str) -> Value {
    if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return Value::Array(
            inner
                .split(',')
                .map(|item| unquote(item.trim()))
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        );
    }

    if is_quoted(s) {
        return Value::String(unquote(s).to_string());
    }

    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    Value::String(s.to_string())
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
}

fn unquote(s: &str) -> &str {
    if is_quoted(s) { &s[1..s.len() - 1] } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: [docker, \"aws\"]\n---\n\n# Body";
        let (fields, body) = extract(content).unwrap();

        assert_eq!(fields["title"], json!("Hello"));
        assert_eq!(fields["date"], json!("2024-01-01"));
        assert_eq!(fields["tags"], json!(["docker", "aws"]));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_yaml_block_list() {
        let content = "---\ntitle: \"Colons: fine\"\ntags:\n  - docker\n  - 'ci/cd'\ndraft: true\n---\nBody";
        let (fields, body) = extract(content).unwrap();

        assert_eq!(fields["title"], json!("Colons: fine"));
        assert_eq!(fields["tags"], json!(["docker", "ci/cd"]));
        assert_eq!(fields["draft"], json!(true));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_yaml_empty_key_is_null() {
        let (fields, _) = extract("---\ntags:\ntitle: x\n---\n").unwrap();
        assert_eq!(fields["tags"], Value::Null);
    }

    #[test]
    fn test_yaml_keeps_commas_in_strings() {
        let (fields, _) = extract("---\ndescription: Go, Docker and more\n---\n").unwrap();
        assert_eq!(fields["description"], json!("Go, Docker and more"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2024-06-15\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (fields, body) = extract(content).unwrap();

        assert_eq!(fields["title"], json!("Hello"));
        assert_eq!(fields["date"], json!("2024-06-15"));
        assert_eq!(fields["tags"], json!(["a", "b"]));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_invalid() {
        let err = extract("+++\ntitle = \n+++\n").unwrap_err();
        assert!(matches!(err, ContentError::InvalidFrontmatter(_)));
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(matches!(
            extract("# Just content"),
            Err(ContentError::MissingFrontmatter)
        ));
        assert!(matches!(
            extract("---\ntitle: never closed\n"),
            Err(ContentError::MissingFrontmatter)
        ));
    }

    #[test]
    fn test_horizontal_rule_is_not_frontmatter() {
        assert!(extract("----\nnot frontmatter\n----\n").is_err());
    }
}
