//! Small shared helpers: dates, HTML escaping, MIME types, paths.

pub mod date;
pub mod html;
pub mod mime;
pub mod path;

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 posts)
/// - `plural_s(1)` -> `""` (1 post)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization: `plural_count(3, "post")` -> `"3 posts"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
