//! Config field path used to point diagnostics at a TOML key.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted config key such as `blog.posts_per_page`.
///
/// Sections expose their keys as associated constants so diagnostics never
/// spell a field name twice:
///
/// ```ignore
/// diag.error(BlogConfig::POSTS_PER_PAGE, "must be at least 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
