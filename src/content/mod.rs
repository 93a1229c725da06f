//! Content loading: discovery, frontmatter, schema checks, slug derivation.

mod error;
mod frontmatter;
mod load;
mod meta;
mod post;
mod slug;

pub use error::{ContentError, ContentReport, ContentReportError, source_label};
pub use load::{collect_markdown_files, load_posts};
pub use meta::PostMeta;
pub use post::Post;
pub use slug::{derive_slug, slugify};
