//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `html` - Page templates (layout, post, listing, ...)
//! - `assets` - Stylesheet and search script written to `{output}/assets/`
//!
//! # Usage
//!
//! ```ignore
//! use embed::html::{NOT_FOUND_HTML, NotFoundVars};
//!
//! let html = NOT_FOUND_HTML.render(&NotFoundVars { blog_url: "/blog/" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod html {
    //! Page templates. Every value passed in is already HTML-safe.

    use super::{Template, TemplateVars};

    /// Variables for the page shell.
    pub struct LayoutVars<'a> {
        pub lang: &'a str,
        pub theme: &'a str,
        pub page_title: &'a str,
        pub description: &'a str,
        pub site_title: &'a str,
        pub blog_url: &'a str,
        pub categories_url: &'a str,
        pub author: &'a str,
        pub stylesheet: &'a str,
        /// Rendered search box, empty when search is disabled.
        pub search: &'a str,
        pub scripts: &'a str,
        pub content: &'a str,
    }

    impl TemplateVars for LayoutVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("LANG", self.lang.into()),
                ("THEME", self.theme.into()),
                ("PAGE_TITLE", self.page_title.into()),
                ("DESCRIPTION", self.description.into()),
                ("SITE_TITLE", self.site_title.into()),
                ("BLOG_URL", self.blog_url.into()),
                ("CATEGORIES_URL", self.categories_url.into()),
                ("AUTHOR", self.author.into()),
                ("STYLESHEET", self.stylesheet.into()),
                ("SEARCH", self.search.into()),
                ("SCRIPTS", self.scripts.into()),
                ("CONTENT", self.content.into()),
            ]
        }
    }

    pub const LAYOUT_HTML: Template<LayoutVars<'static>> =
        Template::new(include_str!("html/layout.html"));

    /// Search box markup; `search.js` carries the index URL.
    pub const SEARCH_BOX_HTML: &str = include_str!("html/search.html");

    /// Variables for a single post page.
    pub struct PostVars<'a> {
        pub title: &'a str,
        pub date: &'a str,
        pub date_iso: &'a str,
        /// ` · updated …` suffix or empty.
        pub updated: &'a str,
        pub tags: &'a str,
        pub image: &'a str,
        pub body: &'a str,
    }

    impl TemplateVars for PostVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("TITLE", self.title.into()),
                ("DATE_ISO", self.date_iso.into()),
                ("DATE", self.date.into()),
                ("UPDATED", self.updated.into()),
                ("TAGS", self.tags.into()),
                ("IMAGE", self.image.into()),
                ("BODY", self.body.into()),
            ]
        }
    }

    pub const POST_HTML: Template<PostVars<'static>> =
        Template::new(include_str!("html/post.html"));

    /// Variables for a post preview card.
    pub struct PreviewVars<'a> {
        /// Extra class, e.g. ` preview-featured`.
        pub variant: &'a str,
        pub url: &'a str,
        pub image: &'a str,
        pub title: &'a str,
        pub date: &'a str,
        pub date_iso: &'a str,
        pub description: &'a str,
        pub tags: &'a str,
    }

    impl TemplateVars for PreviewVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("VARIANT", self.variant.into()),
                ("URL", self.url.into()),
                ("IMAGE", self.image.into()),
                ("TITLE", self.title.into()),
                ("DATE_ISO", self.date_iso.into()),
                ("DATE", self.date.into()),
                ("DESCRIPTION", self.description.into()),
                ("TAGS", self.tags.into()),
            ]
        }
    }

    pub const PREVIEW_HTML: Template<PreviewVars<'static>> =
        Template::new(include_str!("html/preview.html"));

    /// Variables for a listing (main or category).
    pub struct ListingVars<'a> {
        pub heading: &'a str,
        pub featured: &'a str,
        pub grid: &'a str,
        pub pager: &'a str,
    }

    impl TemplateVars for ListingVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("HEADING", self.heading.into()),
                ("FEATURED", self.featured.into()),
                ("GRID", self.grid.into()),
                ("PAGER", self.pager.into()),
            ]
        }
    }

    pub const LISTING_HTML: Template<ListingVars<'static>> =
        Template::new(include_str!("html/listing.html"));

    /// Variables for the pager: `Back · {current} of {total} · Next`.
    pub struct PagerVars<'a> {
        pub prev: &'a str,
        pub next: &'a str,
        pub current: usize,
        pub total: usize,
    }

    impl TemplateVars for PagerVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("PREV", self.prev.into()),
                ("NEXT", self.next.into()),
                ("CURRENT", self.current.to_string()),
                ("TOTAL", self.total.to_string()),
            ]
        }
    }

    pub const PAGER_HTML: Template<PagerVars<'static>> =
        Template::new(include_str!("html/pager.html"));

    pub struct CategoriesVars<'a> {
        pub items: &'a str,
    }

    impl TemplateVars for CategoriesVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![("ITEMS", self.items.into())]
        }
    }

    pub const CATEGORIES_HTML: Template<CategoriesVars<'static>> =
        Template::new(include_str!("html/categories.html"));

    pub struct HomeVars<'a> {
        pub site_title: &'a str,
        pub description: &'a str,
        pub recent: &'a str,
        pub blog_url: &'a str,
    }

    impl TemplateVars for HomeVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("SITE_TITLE", self.site_title.into()),
                ("DESCRIPTION", self.description.into()),
                ("RECENT", self.recent.into()),
                ("BLOG_URL", self.blog_url.into()),
            ]
        }
    }

    pub const HOME_HTML: Template<HomeVars<'static>> =
        Template::new(include_str!("html/home.html"));

    pub struct NotFoundVars<'a> {
        pub blog_url: &'a str,
    }

    impl TemplateVars for NotFoundVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![("BLOG_URL", self.blog_url.into())]
        }
    }

    pub const NOT_FOUND_HTML: Template<NotFoundVars<'static>> =
        Template::new(include_str!("html/404.html"));
}

pub mod assets {
    //! Files written under `{output}/assets/`.

    use std::fs;
    use std::path::Path;

    use anyhow::{Context, Result};

    use super::{Template, TemplateVars};

    pub const STYLESHEET_URL: &str = "/assets/quire.css";
    pub const SEARCH_SCRIPT_URL: &str = "/assets/search.js";

    pub const QUIRE_CSS: &str = include_str!("assets/quire.css");

    /// Variables for search.js. Values are emitted as JS literals.
    pub struct SearchJsVars<'a> {
        pub index_url: &'a str,
        pub min_length: usize,
    }

    impl TemplateVars for SearchJsVars<'_> {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                (
                    "INDEX_URL",
                    serde_json::to_string(self.index_url).unwrap_or_else(|_| "\"\"".into()),
                ),
                ("MIN_LENGTH", self.min_length.to_string()),
            ]
        }
    }

    pub const SEARCH_JS: Template<SearchJsVars<'static>> =
        Template::new(include_str!("assets/search.js"));

    /// Write the stylesheet, and the search script when `search` is given.
    pub fn write_embedded_assets(output_dir: &Path, search: Option<&SearchJsVars<'_>>) -> Result<()> {
        let dir = output_dir.join("assets");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        fs::write(dir.join("quire.css"), QUIRE_CSS)?;
        if let Some(vars) = search {
            fs::write(dir.join("search.js"), SEARCH_JS.render(vars))?;
        }
        Ok(())
    }
}
