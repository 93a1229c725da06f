//! Listing pagination.
//!
//! Posts are assigned to pages after the global date sort:
//!
//! ```text
//! total = 11, per_page = 5
//! page 0: [0, 5)   /blog/     (post 0 is featured)
//! page 1: [5, 10)  /blog/2/
//! page 2: [10, 11) /blog/3/
//! ```

use std::ops::Range;

use crate::core::UrlPath;

/// Page count and windows for `total` posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlan {
    pub total: usize,
    pub per_page: usize,
    /// `ceil(total / per_page)`; zero when there are no posts.
    pub num_pages: usize,
}

impl PaginationPlan {
    /// `per_page` is clamped to at least 1.
    pub fn new(total: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            total,
            per_page,
            num_pages: total.div_ceil(per_page),
        }
    }

    /// Index window owned by `page` (0-indexed). Empty past the last page.
    pub fn window(&self, page: usize) -> Range<usize> {
        let start = page.saturating_mul(self.per_page).min(self.total);
        let end = start.saturating_add(self.per_page).min(self.total);
        start..end
    }

    /// All windows, in page order.
    pub fn windows(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.num_pages).map(|page| self.window(page))
    }

    /// Route of `page`: the root for page 0, `{root}{page + 1}/` after that.
    pub fn page_path(root: &UrlPath, page: usize) -> UrlPath {
        if page == 0 {
            root.clone()
        } else {
            root.join(&(page + 1).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eleven_posts_five_per_page() {
        let plan = PaginationPlan::new(11, 5);
        assert_eq!(plan.num_pages, 3);
        let windows: Vec<_> = plan.windows().collect();
        assert_eq!(windows, vec![0..5, 5..10, 10..11]);
    }

    #[test]
    fn test_exact_multiple() {
        let plan = PaginationPlan::new(10, 5);
        assert_eq!(plan.num_pages, 2);
        assert_eq!(plan.window(1), 5..10);
    }

    #[test]
    fn test_empty() {
        let plan = PaginationPlan::new(0, 5);
        assert_eq!(plan.num_pages, 0);
        assert_eq!(plan.windows().count(), 0);
        assert_eq!(plan.window(0), 0..0);
    }

    #[test]
    fn test_window_past_end_is_empty() {
        let plan = PaginationPlan::new(3, 5);
        assert_eq!(plan.window(4), 3..3);
    }

    #[test]
    fn test_zero_per_page_clamped() {
        let plan = PaginationPlan::new(2, 0);
        assert_eq!(plan.per_page, 1);
        assert_eq!(plan.num_pages, 2);
    }

    #[test]
    fn test_windows_cover_every_post_once() {
        for total in 0..30 {
            for per_page in 1..8 {
                let plan = PaginationPlan::new(total, per_page);
                let covered: Vec<usize> = plan.windows().flatten().collect();
                assert_eq!(covered, (0..total).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_page_path() {
        let root = UrlPath::from_page("/blog/");
        assert_eq!(PaginationPlan::page_path(&root, 0), "/blog/");
        assert_eq!(PaginationPlan::page_path(&root, 1), "/blog/2/");
        assert_eq!(PaginationPlan::page_path(&root, 2), "/blog/3/");
    }
}
