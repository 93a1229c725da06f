//! Build-time content rules: tag vocabulary, slug agreement, unique routes.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::content::{ContentError, ContentReport, Post};
use crate::core::UrlPath;

/// Check one post against the vocabulary and its derived slug.
///
/// - `tags` missing or empty
/// - every tag outside the vocabulary (exact, case-sensitive)
/// - declared `path` differs from the derived slug (both reported)
pub fn check_post(post: &Post, vocabulary: &FxHashSet<&str>) -> Vec<ContentError> {
    let mut errors = Vec::new();

    if post.tags.is_empty() {
        errors.push(ContentError::MissingTags);
    }
    for tag in &post.tags {
        if !vocabulary.contains(tag.as_str()) {
            errors.push(ContentError::UnknownTag { tag: tag.clone() });
        }
    }

    if post.path != post.slug {
        errors.push(ContentError::SlugMismatch {
            declared: post.path.clone(),
            derived: post.slug.clone(),
        });
    }

    errors
}

/// Run [`check_post`] over every post, grouped by source file.
pub fn check_posts<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    vocabulary: &FxHashSet<&str>,
) -> ContentReport {
    let mut report = ContentReport::new();
    for post in posts {
        report.extend(post.label.clone(), check_post(post, vocabulary));
    }
    report
}

/// A route owned by the generator (listing, category, home, 404).
#[derive(Debug, Clone)]
pub struct GeneratedRoute {
    pub path: UrlPath,
    /// Shown as the "other" side of a collision.
    pub owner: String,
}

/// Every route, generated or post, must have a single owner.
///
/// Generated collisions are reported under the later route's owner.
pub fn check_duplicates(posts: &[&Post], generated: &[GeneratedRoute]) -> ContentReport {
    let mut report = ContentReport::new();
    let mut owners: FxHashMap<&UrlPath, String> = FxHashMap::default();

    for route in generated {
        match owners.get(&route.path) {
            Some(other) => report.add(
                route.owner.clone(),
                ContentError::DuplicateRoute {
                    path: route.path.clone(),
                    other: other.clone(),
                },
            ),
            None => {
                owners.insert(&route.path, route.owner.clone());
            }
        }
    }

    for post in posts {
        match owners.get(&post.path) {
            Some(other) => report.add(
                post.label.clone(),
                ContentError::DuplicateRoute {
                    path: post.path.clone(),
                    other: other.clone(),
                },
            ),
            None => {
                owners.insert(&post.path, post.label.clone());
            }
        }
    }

    report
}
