//! Route planning: draft gate, global sort, listings, categories.

use std::ops::Range;

use crate::config::SiteConfig;
use crate::content::{ContentReport, Post, slugify};
use crate::core::{BuildMode, UrlPath};
use crate::log;

use super::paginate::PaginationPlan;
use super::rules::{self, GeneratedRoute};

/// One page of the main listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub path: UrlPath,
    /// 0-indexed page number.
    pub page: usize,
    pub num_pages: usize,
    /// Index of the featured post (page 0 only).
    pub featured: Option<usize>,
    /// Indices shown in the preview grid.
    pub grid: Range<usize>,
}

impl ListingPage {
    pub fn prev_path(&self, root: &UrlPath) -> Option<UrlPath> {
        (self.page > 0).then(|| PaginationPlan::page_path(root, self.page - 1))
    }

    pub fn next_path(&self, root: &UrlPath) -> Option<UrlPath> {
        (self.page + 1 < self.num_pages).then(|| PaginationPlan::page_path(root, self.page + 1))
    }
}

/// Listing of the posts carrying one vocabulary tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
    pub name: String,
    pub path: UrlPath,
    /// Indices into [`SitePlan::posts`], date-descending.
    pub posts: Vec<usize>,
}

/// Everything the renderer needs, computed once per build.
#[derive(Debug)]
pub struct SitePlan {
    /// Eligible posts, sorted by date desc then path asc.
    pub posts: Vec<Post>,
    pub pagination: PaginationPlan,
    pub listings: Vec<ListingPage>,
    pub categories: Vec<CategoryPage>,
    pub blog_root: UrlPath,
    pub categories_root: UrlPath,
    /// Drafts left out by the draft gate.
    pub skipped_drafts: usize,
}

impl SitePlan {
    /// Posts in the grid of `listing`.
    pub fn grid_posts(&self, listing: &ListingPage) -> &[Post] {
        &self.posts[listing.grid.clone()]
    }

    /// Number of routes the renderer will write.
    pub fn route_count(&self) -> usize {
        // posts + listings + categories + categories index + 404 + home
        self.posts.len() + self.listings.len() + self.categories.len() + 2 + usize::from(!self.blog_root.is_root())
    }
}

/// Apply the content rules and the draft gate, then lay out every route.
///
/// Tag and slug rules apply to every parsed post, drafts included; duplicate
/// routes are only checked among eligible posts.
pub fn plan_site(posts: Vec<Post>, config: &SiteConfig, mode: BuildMode) -> Result<SitePlan, ContentReport> {
    let vocabulary = config.blog.vocabulary();
    let mut report = rules::check_posts(&posts, &vocabulary);

    let (mut eligible, drafts): (Vec<Post>, Vec<Post>) =
        posts.into_iter().partition(|p| mode.is_published(p.draft));
    for draft in &drafts {
        log!("draft"; "skipping {}", draft.path);
    }

    sort_posts(&mut eligible);

    let blog_root = config.blog.root_url();
    let categories_root = config.blog.categories_url();
    let pagination = PaginationPlan::new(eligible.len(), config.blog.posts_per_page);
    let listings = listing_pages(&pagination, &blog_root);
    let categories = category_pages(&eligible, &config.blog.categories, &categories_root);

    let generated = generated_routes(&listings, &categories, &blog_root, &categories_root);
    let refs: Vec<&Post> = eligible.iter().collect();
    report.merge(rules::check_duplicates(&refs, &generated));

    if !report.is_empty() {
        return Err(report);
    }

    Ok(SitePlan {
        posts: eligible,
        pagination,
        listings,
        categories,
        blog_root,
        categories_root,
        skipped_drafts: drafts.len(),
    })
}

/// Date descending, then path ascending for a total order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path)));
}

/// Listing pages. With no posts a single empty root page is still planned.
fn listing_pages(pagination: &PaginationPlan, root: &UrlPath) -> Vec<ListingPage> {
    if pagination.num_pages == 0 {
        return vec![ListingPage {
            path: root.clone(),
            page: 0,
            num_pages: 0,
            featured: None,
            grid: 0..0,
        }];
    }

    pagination
        .windows()
        .enumerate()
        .map(|(page, window)| {
            let (featured, grid) = if page == 0 && !window.is_empty() {
                (Some(window.start), window.start + 1..window.end)
            } else {
                (None, window)
            };
            ListingPage {
                path: PaginationPlan::page_path(root, page),
                page,
                num_pages: pagination.num_pages,
                featured,
                grid,
            }
        })
        .collect()
}

/// One page per vocabulary category, even when empty.
fn category_pages(posts: &[Post], vocabulary: &[String], root: &UrlPath) -> Vec<CategoryPage> {
    let mut seen = rustc_hash::FxHashSet::default();
    vocabulary
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .map(|name| CategoryPage {
            name: name.clone(),
            path: root.join(&slugify(name)),
            posts: posts
                .iter()
                .enumerate()
                .filter(|(_, p)| p.tags.iter().any(|t| t == name))
                .map(|(i, _)| i)
                .collect(),
        })
        .collect()
}

fn generated_routes(
    listings: &[ListingPage],
    categories: &[CategoryPage],
    blog_root: &UrlPath,
    categories_root: &UrlPath,
) -> Vec<GeneratedRoute> {
    let mut routes: Vec<GeneratedRoute> = listings
        .iter()
        .map(|l| GeneratedRoute {
            path: l.path.clone(),
            owner: format!("listing page {}", l.page + 1),
        })
        .collect();
    routes.extend(categories.iter().map(|c| GeneratedRoute {
        path: c.path.clone(),
        owner: format!("category `{}`", c.name),
    }));
    routes.push(GeneratedRoute {
        path: categories_root.clone(),
        owner: "categories index".into(),
    });
    if !blog_root.is_root() {
        routes.push(GeneratedRoute {
            path: UrlPath::root(),
            owner: "home page".into(),
        });
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::ContentError;
    use std::path::Path;

    fn post(slug: &str, date: &str, tags: &str, draft: bool) -> Post {
        let content = format!(
            "---\ntitle: {slug}\ndescription: about {slug}\ndate: {date}\ntags: {tags}\ndraft: {draft}\n---\nbody\n"
        );
        let rel = format!("blog/{slug}.md");
        Post::parse(Path::new(&rel), &content).unwrap()
    }

    fn many(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| post(&format!("p{i:02}"), &format!("2022-01-{:02}", i + 1), "[aws]", false))
            .collect()
    }

    #[test]
    fn test_plan_eleven_posts() {
        let config = test_parse_config("");
        let plan = plan_site(many(11), &config, BuildMode::PRODUCTION).unwrap();

        assert_eq!(plan.pagination.num_pages, 3);
        let paths: Vec<_> = plan.listings.iter().map(|l| l.path.to_string()).collect();
        assert_eq!(paths, vec!["/blog/", "/blog/2/", "/blog/3/"]);

        // Newest first, featured is the newest
        assert_eq!(plan.posts[0].title, "p10");
        assert_eq!(plan.listings[0].featured, Some(0));
        assert_eq!(plan.listings[0].grid, 1..5);
        assert_eq!(plan.listings[1].grid, 5..10);
        assert_eq!(plan.listings[2].grid, 10..11);
        assert_eq!(plan.listings[2].featured, None);
    }

    #[test]
    fn test_prev_next() {
        let config = test_parse_config("");
        let plan = plan_site(many(11), &config, BuildMode::PRODUCTION).unwrap();
        let root = &plan.blog_root;

        assert_eq!(plan.listings[0].prev_path(root), None);
        assert_eq!(plan.listings[0].next_path(root).unwrap(), "/blog/2/");
        assert_eq!(plan.listings[1].prev_path(root).unwrap(), "/blog/");
        assert_eq!(plan.listings[2].next_path(root), None);
    }

    #[test]
    fn test_empty_site_has_root_listing() {
        let config = test_parse_config("");
        let plan = plan_site(vec![], &config, BuildMode::PRODUCTION).unwrap();
        assert_eq!(plan.pagination.num_pages, 0);
        assert_eq!(plan.listings.len(), 1);
        assert_eq!(plan.listings[0].path, "/blog/");
        assert_eq!(plan.categories.len(), 15);
    }

    #[test]
    fn test_draft_gate() {
        let config = test_parse_config("");
        let posts = || {
            vec![
                post("live", "2022-01-01", "[aws]", false),
                post("wip", "2022-02-01", "[aws]", true),
            ]
        };

        let prod = plan_site(posts(), &config, BuildMode::PRODUCTION).unwrap();
        assert_eq!(prod.posts.len(), 1);
        assert_eq!(prod.skipped_drafts, 1);
        assert_eq!(prod.categories[0].posts, vec![0]);

        let dev = plan_site(posts(), &config, BuildMode::DEVELOPMENT).unwrap();
        assert_eq!(dev.posts.len(), 2);
        assert_eq!(dev.posts[0].title, "wip");
        assert_eq!(dev.skipped_drafts, 0);
    }

    #[test]
    fn test_categories() {
        let config = test_parse_config("[blog]\ncategories = [\"docker\", \"aws\", \"ci/cd\"]");
        let posts = vec![
            post("both", "2022-03-01", "[docker, aws]", false),
            post("aws-only", "2022-01-01", "[aws]", false),
        ];
        let plan = plan_site(posts, &config, BuildMode::PRODUCTION).unwrap();

        let docker = &plan.categories[0];
        assert_eq!(docker.path, "/categories/docker/");
        assert_eq!(docker.posts, vec![0]);

        let aws = &plan.categories[1];
        assert_eq!(aws.posts, vec![0, 1]);

        let cicd = &plan.categories[2];
        assert_eq!(cicd.path, "/categories/ci-cd/");
        assert!(cicd.posts.is_empty());
    }

    #[test]
    fn test_rules_collected_across_posts() {
        let config = test_parse_config("");
        let mut mismatched = post("bar", "2022-01-01", "[aws]", false);
        mismatched.path = UrlPath::from_page("/blog/foo");
        let posts = vec![
            post("rusty", "2022-01-01", "[rust]", false),
            mismatched,
            post("draft-bad", "2022-01-01", "[nope]", true),
        ];

        let report = plan_site(posts, &config, BuildMode::PRODUCTION).unwrap_err();
        assert_eq!(report.file_count(), 3);
        assert!(matches!(
            report.errors_for("blog/bar.md"),
            [ContentError::SlugMismatch { .. }]
        ));
    }

    #[test]
    fn test_sort_tiebreak_by_path() {
        let mut posts = vec![
            post("b", "2022-01-01", "[aws]", false),
            post("a", "2022-01-01", "[aws]", false),
            post("c", "2023-01-01", "[aws]", false),
        ];
        sort_posts(&mut posts);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_post_colliding_with_listing() {
        let config = test_parse_config("");
        let mut posts = many(6);
        posts[0].path = UrlPath::from_page("/blog/2/");
        posts[0].slug = posts[0].path.clone();

        let report = plan_site(posts, &config, BuildMode::PRODUCTION).unwrap_err();
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_colliding_category_routes_fail() {
        let config = test_parse_config("[blog]\ncategories = [\"ci/cd\", \"ci-cd\", \"++\"]");
        let posts = vec![post("pipes", "2022-01-01", "[ci/cd]", false)];

        let report = plan_site(posts, &config, BuildMode::PRODUCTION).unwrap_err();
        assert_eq!(report.error_count(), 2);
        assert!(matches!(
            report.errors_for("category `ci-cd`"),
            [ContentError::DuplicateRoute { other, .. }] if other == "category `ci/cd`"
        ));
        assert!(matches!(
            report.errors_for("categories index"),
            [ContentError::DuplicateRoute { other, .. }] if other == "category `++`"
        ));
    }
}
