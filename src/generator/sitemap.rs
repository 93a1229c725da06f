//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/docker-ci/</loc>
//!     <lastmod>2022-07-08</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::SitePlan;
use crate::config::join_site_url;
use crate::log;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    /// Every planned route under `base_url`; posts carry `<lastmod>`.
    pub fn build(plan: &SitePlan, base_url: &str) -> Self {
        let entry = |path: &str, lastmod: Option<String>| UrlEntry {
            loc: join_site_url(base_url, path),
            lastmod,
        };

        let mut urls = Vec::with_capacity(plan.route_count());
        if !plan.blog_root.is_root() {
            urls.push(entry("/", None));
        }
        urls.extend(plan.listings.iter().map(|l| entry(&l.path.to_encoded(), None)));
        urls.extend(plan.posts.iter().map(|p| {
            let lastmod = p.updated.unwrap_or(p.date).to_iso_date();
            entry(&p.path.to_encoded(), Some(lastmod))
        }));
        urls.push(entry(&plan.categories_root.to_encoded(), None));
        urls.extend(plan.categories.iter().map(|c| entry(&c.path.to_encoded(), None)));

        Self { urls }
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    pub fn write(self, path: &Path) -> Result<()> {
        let xml = self.into_xml();
        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
