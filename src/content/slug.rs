//! Route derivation from file locations and category names.

use std::path::Path;

use crate::core::UrlPath;

/// Derive a post route from its location relative to the content directory.
///
/// | file                  | route         |
/// |-----------------------|---------------|
/// | `blog/foo.md`         | `/blog/foo/`  |
/// | `blog/foo/index.md`   | `/blog/foo/`  |
/// | `index.md`            | `/`           |
pub fn derive_slug(relative: &Path) -> UrlPath {
    let without_ext = relative.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    UrlPath::from_page(&segments.join("/"))
}

/// Slugify a category name for use as a route segment.
///
/// Transliterates to ASCII, lowercases, and joins alphanumeric runs with `-`:
/// `ci/cd` -> `ci-cd`, `Node.js` -> `node-js`.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode::deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
