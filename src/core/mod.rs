//! Core types shared across the codebase.

mod driver;
mod state;
mod url;

pub use driver::BuildMode;
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
pub use url::UrlPath;
