//! Configuration sections of `quire.toml`.

mod blog;
mod build;
mod serve;
mod site;

pub use blog::BlogConfig;
pub use build::BuildSectionConfig;
pub use serve::ServeConfig;
pub use site::{SiteSectionConfig, Theme};
