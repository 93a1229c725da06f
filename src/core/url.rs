//! URL path type for route handling.
//!
//! - Internal representation: always decoded (human-readable)
//! - Browser boundary: decode on input, encode on output

use std::borrow::Borrow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Decoded route path.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Always ends with `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from browser URL (decode percent-encoding, strip query string).
    pub fn from_browser(encoded: &str) -> Self {
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_page(&decoded)
    }

    /// Create page URL. Normalizes leading/trailing slashes, collapses
    /// repeated slashes and strips query string and fragment.
    pub fn from_page(decoded: &str) -> Self {
        let path = decoded.trim().split(['?', '#']).next().unwrap_or_default();

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Self::root();
        }

        Self(Arc::from(format!("/{}/", segments.join("/"))))
    }

    /// The site root `/`.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a segment: `/blog/` + `2` -> `/blog/2/`.
    pub fn join(&self, segment: &str) -> Self {
        Self::from_page(&format!("{}{}", self.0, segment))
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Output file for this route: `/blog/foo/` -> `{output}/blog/foo/index.html`.
    pub fn output_file(&self, output_dir: &Path) -> PathBuf {
        let mut file = output_dir.to_path_buf();
        for segment in self.0.split('/').filter(|s| !s.is_empty()) {
            file.push(segment);
        }
        file.push("index.html");
        file
    }

    /// Check if the URL path is the root `/`.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_page(s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_page(&s))
    }
}
