//! Page generator: content rules, pagination and route planning.
//!
//! ```text
//! Vec<Post> ──► rules (tags, slug) ──► draft gate ──► sort ──► SitePlan
//!                                                              ├── listings (paginated)
//!                                                              ├── posts
//!                                                              └── categories
//! ```

pub mod paginate;
pub mod routes;
pub mod rules;
pub mod sitemap;

pub use routes::{CategoryPage, ListingPage, SitePlan, plan_site};
