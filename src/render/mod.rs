//! Page rendering.
//!
//! Turns a [`SitePlan`] into HTML strings using the embedded templates.
//! Every piece of user text passes through [`escape`] before it reaches a
//! template slot; post bodies are already HTML from [`markdown`].

pub mod icon;
pub mod markdown;

use std::borrow::Cow;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{Post, slugify};
use crate::core::UrlPath;
use crate::embed::assets::{SEARCH_SCRIPT_URL, STYLESHEET_URL};
use crate::embed::html::{
    CATEGORIES_HTML, CategoriesVars, HOME_HTML, HomeVars, LAYOUT_HTML, LISTING_HTML, LayoutVars,
    ListingVars, NOT_FOUND_HTML, NotFoundVars, PAGER_HTML, POST_HTML, PREVIEW_HTML, PagerVars,
    PostVars, PreviewVars, SEARCH_BOX_HTML,
};
use crate::generator::{CategoryPage, ListingPage, SitePlan};
use crate::utils::html::{escape, escape_attr};

use icon::TagIcon;

/// Posts shown on the home page.
const HOME_RECENT: usize = 3;

/// A route to render, borrowed from the plan.
#[derive(Debug, Clone, Copy)]
pub enum Route<'a> {
    Post(&'a Post),
    Listing(&'a ListingPage),
    Category(&'a CategoryPage),
    CategoriesIndex,
    /// Site root, only when the blog lives elsewhere.
    Home,
}

impl Route<'_> {
    pub fn path(&self, plan: &SitePlan) -> UrlPath {
        match self {
            Self::Post(post) => post.path.clone(),
            Self::Listing(listing) => listing.path.clone(),
            Self::Category(category) => category.path.clone(),
            Self::CategoriesIndex => plan.categories_root.clone(),
            Self::Home => UrlPath::root(),
        }
    }

    /// Progress counter name.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Post(_) => "posts",
            Self::Listing(_) => "listings",
            Self::Category(_) | Self::CategoriesIndex => "categories",
            Self::Home => "pages",
        }
    }
}

/// Shared inputs for rendering one site.
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    pub plan: &'a SitePlan,
    /// URL of the search index, `None` when search is disabled.
    search_url: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, plan: &'a SitePlan) -> Self {
        let search_url = config
            .build
            .search
            .enable
            .then(|| output_url(&config.build.search.path));
        Self {
            config,
            plan,
            search_url,
        }
    }

    pub fn search_url(&self) -> Option<&str> {
        self.search_url.as_deref()
    }

    /// Every route of the site, in plan order.
    pub fn routes(&self) -> Vec<Route<'a>> {
        let plan = self.plan;
        let mut routes: Vec<Route<'a>> = plan.posts.iter().map(Route::Post).collect();
        routes.extend(plan.listings.iter().map(Route::Listing));
        routes.extend(plan.categories.iter().map(Route::Category));
        routes.push(Route::CategoriesIndex);
        if !plan.blog_root.is_root() {
            routes.push(Route::Home);
        }
        routes
    }

    pub fn render(&self, route: &Route<'_>) -> String {
        match route {
            Route::Post(post) => self.render_post(post),
            Route::Listing(listing) => self.render_listing(listing),
            Route::Category(category) => self.render_category(category),
            Route::CategoriesIndex => self.render_categories_index(),
            Route::Home => self.render_home(),
        }
    }

    pub fn render_post(&self, post: &Post) -> String {
        let updated = post
            .updated
            .map(|u| {
                format!(
                    r#" · updated <time datetime="{}">{}</time>"#,
                    u.to_iso_date(),
                    u.to_display()
                )
            })
            .unwrap_or_default();
        let image = post
            .featured_image
            .as_deref()
            .map(|src| image_tag("post-image", src, post.image_description.as_deref().unwrap_or(&post.title)))
            .unwrap_or_default();

        let content = POST_HTML.render(&PostVars {
            title: &escape(&post.title),
            date: &post.display_date(),
            date_iso: &post.date.to_iso_date(),
            updated: &updated,
            tags: &self.tag_chips(&post.tags),
            image: &image,
            body: &post.html,
        });
        self.layout(Some(post.title.as_str()), &post.description, &content)
    }

    /// One page of the main listing: featured post on page 0, grid, pager.
    pub fn render_listing(&self, listing: &ListingPage) -> String {
        let plan = self.plan;
        let featured = listing
            .featured
            .map(|i| self.preview(&plan.posts[i], true))
            .unwrap_or_default();
        let grid = plan.grid_posts(listing);

        let grid = if grid.is_empty() && featured.is_empty() {
            r#"<p class="listing-empty">No posts.</p>"#.to_string()
        } else {
            self.previews(grid.iter())
        };

        let content = LISTING_HTML.render(&ListingVars {
            heading: "Blog",
            featured: &featured,
            grid: &grid,
            pager: &self.pager(listing),
        });

        let title = match listing.page {
            0 => Cow::Borrowed("Blog"),
            page => Cow::Owned(format!("Blog (page {})", page + 1)),
        };
        self.layout(Some(&*title), &self.config.site.description, &content)
    }

    pub fn render_category(&self, category: &CategoryPage) -> String {
        let posts = category.posts.iter().map(|&i| &self.plan.posts[i]);
        let grid = if category.posts.is_empty() {
            r#"<p class="listing-empty">No posts.</p>"#.to_string()
        } else {
            self.previews(posts)
        };

        let heading = format!("Category: {}", escape(&category.name));
        let content = LISTING_HTML.render(&ListingVars {
            heading: &heading,
            featured: "",
            grid: &grid,
            pager: "",
        });
        let title = format!("Category: {}", category.name);
        self.layout(Some(title.as_str()), &self.config.site.description, &content)
    }

    /// All categories with their post counts.
    pub fn render_categories_index(&self) -> String {
        let items: String = self
            .plan
            .categories
            .iter()
            .map(|c| {
                format!(
                    "    <li class=\"tag\"><a href=\"{}\">{}{}</a> <span class=\"category-count\">{}</span></li>\n",
                    escape_attr(&c.path.to_encoded()),
                    TagIcon::for_tag(&c.name).svg(),
                    escape(&c.name),
                    c.posts.len()
                )
            })
            .collect();

        let content = CATEGORIES_HTML.render(&CategoriesVars {
            items: items.trim_end(),
        });
        self.layout(Some("Categories"), &self.config.site.description, &content)
    }

    pub fn render_home(&self) -> String {
        let site = &self.config.site;
        let recent = self.previews(self.plan.posts.iter().take(HOME_RECENT));
        let content = HOME_HTML.render(&HomeVars {
            site_title: &escape(&site.title),
            description: &escape(&site.description),
            recent: &recent,
            blog_url: &escape_attr(&self.plan.blog_root.to_encoded()),
        });
        self.layout(None, &site.description, &content)
    }

    pub fn render_not_found(&self) -> String {
        let content = NOT_FOUND_HTML.render(&NotFoundVars {
            blog_url: &escape_attr(&self.plan.blog_root.to_encoded()),
        });
        self.layout(Some("Page not found"), &self.config.site.description, &content)
    }

    /// Wrap page content in the site shell.
    fn layout(&self, title: Option<&str>, description: &str, content: &str) -> String {
        let site = &self.config.site;
        let page_title = match title {
            Some(title) if !site.title.is_empty() => format!("{title} | {}", site.title),
            Some(title) => title.to_string(),
            None => site.title.clone(),
        };

        let (search, scripts) = match &self.search_url {
            Some(_) => (
                SEARCH_BOX_HTML.to_string(),
                format!(r#"<script src="{SEARCH_SCRIPT_URL}" defer></script>"#),
            ),
            None => (String::new(), String::new()),
        };

        LAYOUT_HTML.render(&LayoutVars {
            lang: &escape_attr(&site.language),
            theme: site.theme.as_str(),
            page_title: &escape(&page_title),
            description: &escape_attr(description),
            site_title: &escape(&site.title),
            blog_url: &escape_attr(&self.plan.blog_root.to_encoded()),
            categories_url: &escape_attr(&self.plan.categories_root.to_encoded()),
            author: &escape(&site.author),
            stylesheet: STYLESHEET_URL,
            search: &search,
            scripts: &scripts,
            content,
        })
    }

    fn previews<'p>(&self, posts: impl Iterator<Item = &'p Post>) -> String {
        posts
            .map(|post| self.preview(post, false))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn preview(&self, post: &Post, featured: bool) -> String {
        let image = post
            .featured_image
            .as_deref()
            .map(|src| image_tag("preview-image", src, post.image_description.as_deref().unwrap_or(&post.title)))
            .unwrap_or_default();

        PREVIEW_HTML.render(&PreviewVars {
            variant: if featured { " preview-featured" } else { "" },
            url: &escape_attr(&post.path.to_encoded()),
            image: &image,
            title: &escape(&post.title),
            date: &post.display_date(),
            date_iso: &post.date.to_iso_date(),
            description: &escape(&post.description),
            tags: &self.tag_chips(&post.tags),
        })
    }

    /// `Back · {current} of {total} · Next`, empty when there is nothing to page.
    fn pager(&self, listing: &ListingPage) -> String {
        if listing.num_pages == 0 {
            return String::new();
        }
        let root = &self.plan.blog_root;
        let link = |target: Option<UrlPath>, label: &str, class: &str| match target {
            Some(path) => format!(
                r#"<a class="{class}" href="{}">{label}</a>"#,
                escape_attr(&path.to_encoded())
            ),
            None => format!(r#"<span class="{class} pager-disabled">{label}</span>"#),
        };

        PAGER_HTML.render(&PagerVars {
            prev: &link(listing.prev_path(root), "Back", "pager-prev"),
            next: &link(listing.next_path(root), "Next", "pager-next"),
            current: listing.page + 1,
            total: listing.num_pages,
        })
    }

    /// Tag chips linking to their category pages.
    fn tag_chips(&self, tags: &[String]) -> String {
        tags.iter()
            .map(|tag| {
                let href = self.plan.categories_root.join(&slugify(tag));
                format!(
                    r#"<li class="tag"><a href="{}">{}{}</a></li>"#,
                    escape_attr(&href.to_encoded()),
                    TagIcon::for_tag(tag).svg(),
                    escape(tag)
                )
            })
            .collect()
    }
}

/// URL of a file written at `relative` below the output directory.
pub fn output_url(relative: &Path) -> String {
    let relative = relative.to_string_lossy().replace('\\', "/");
    format!("/{}", relative.trim_start_matches('/'))
}

fn image_tag(class: &str, src: &str, alt: &str) -> String {
    format!(
        r#"<img class="{class}" src="{}" alt="{}" loading="lazy">"#,
        escape_attr(src),
        escape_attr(alt)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::core::BuildMode;
    use crate::generator::plan_site;

    fn post(slug: &str, date: &str, tags: &str) -> Post {
        let content = format!(
            "---\ntitle: {slug} <b>\ndescription: about {slug}\ndate: {date}\ntags: {tags}\nfeaturedImage: /img/{slug}.png\n---\n*body*\n"
        );
        let rel = format!("blog/{slug}.md");
        Post::parse(Path::new(&rel), &content).unwrap()
    }

    fn plan(config: &SiteConfig, n: usize) -> SitePlan {
        let posts = (0..n)
            .map(|i| post(&format!("p{i}"), &format!("2022-01-{:02}", i + 1), "[docker, aws]"))
            .collect();
        plan_site(posts, config, BuildMode::PRODUCTION).unwrap()
    }

    #[test]
    fn test_post_page() {
        let config = test_parse_config("theme = \"dark\"");
        let plan = plan(&config, 1);
        let ctx = RenderContext::new(&config, &plan);
        let html = ctx.render_post(&plan.posts[0]);

        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("p0 &lt;b&gt;"));
        assert!(!html.contains("p0 <b>"));
        assert!(html.contains("<em>body</em>"));
        assert!(html.contains(r#"href="/categories/docker/""#));
        assert!(html.contains(r#"class="tag-icon""#));
        assert!(html.contains(r#"<time datetime="2022-01-01">Jan 01, 2022</time>"#));
        assert!(html.contains(r#"class="post-image" src="/img/p0.png""#));
    }

    #[test]
    fn test_listing_pages() {
        let config = test_parse_config("");
        let plan = plan(&config, 11);
        let ctx = RenderContext::new(&config, &plan);

        let first = ctx.render_listing(&plan.listings[0]);
        assert_eq!(first.matches("preview preview-featured").count(), 1);
        assert_eq!(first.matches(r#"<article class="preview""#).count(), 4);
        assert!(first.contains("1 of 3"));
        assert!(first.contains(r#"<span class="pager-prev pager-disabled">Back</span>"#));
        assert!(first.contains(r#"<a class="pager-next" href="/blog/2/">Next</a>"#));

        let last = ctx.render_listing(&plan.listings[2]);
        assert!(!last.contains("preview-featured"));
        assert!(last.contains("3 of 3"));
        assert!(last.contains(r#"<a class="pager-prev" href="/blog/2/">Back</a>"#));
        assert!(last.contains(r#"<span class="pager-next pager-disabled">Next</span>"#));
    }

    #[test]
    fn test_empty_listing() {
        let config = test_parse_config("");
        let plan = plan(&config, 0);
        let ctx = RenderContext::new(&config, &plan);
        let html = ctx.render_listing(&plan.listings[0]);
        assert!(html.contains("No posts."));
        assert!(!html.contains("pager-status"));
    }

    #[test]
    fn test_category_pages() {
        let config = test_parse_config("[blog]\ncategories = [\"docker\", \"aws\", \"ci/cd\"]");
        let plan = plan(&config, 2);
        let ctx = RenderContext::new(&config, &plan);

        let docker = ctx.render_category(&plan.categories[0]);
        assert!(docker.contains("Category: docker"));
        assert_eq!(docker.matches(r#"<article class="preview""#).count(), 2);

        let cicd = ctx.render_category(&plan.categories[2]);
        assert!(cicd.contains("No posts."));

        let index = ctx.render_categories_index();
        assert!(index.contains(r#"href="/categories/ci-cd/""#));
        assert!(index.contains(r#"<span class="category-count">2</span>"#));
    }

    #[test]
    fn test_search_toggle() {
        let config = test_parse_config("");
        let plan = plan(&config, 1);
        let ctx = RenderContext::new(&config, &plan);
        assert_eq!(ctx.search_url(), Some("/search-index.json"));
        let html = ctx.render_not_found();
        assert!(html.contains("search-input"));
        assert!(!html.contains("data-index"));
        assert!(html.contains(SEARCH_SCRIPT_URL));

        let config = test_parse_config("[build.search]\nenable = false");
        let ctx = RenderContext::new(&config, &plan);
        assert_eq!(ctx.search_url(), None);
        assert!(!ctx.render_not_found().contains("search-input"));
    }

    #[test]
    fn test_routes() {
        let config = test_parse_config("");
        let plan = plan(&config, 6);
        let ctx = RenderContext::new(&config, &plan);
        let routes = ctx.routes();

        // 6 posts + 2 listings + 15 categories + index + home
        assert_eq!(routes.len(), 25);
        assert_eq!(routes.len() + 1, plan.route_count());
        assert!(routes.iter().any(|r| r.path(&plan).is_root()));
    }

    #[test]
    fn test_output_url() {
        assert_eq!(output_url(Path::new("search-index.json")), "/search-index.json");
        assert_eq!(output_url(Path::new("data/index.json")), "/data/index.json");
    }
}
