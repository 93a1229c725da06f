//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// quire static blog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new blog with a sample post
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the generated config instead of writing files
        #[arg(long)]
        dry: bool,
    },

    /// Build the blog for production
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build in development mode and serve the output directory
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check tags, slugs and frontmatter without writing output
    #[command(visible_alias = "v")]
    Validate {
        /// Validate as a development build (drafts are checked too)
        #[arg(short, long)]
        dev: bool,
    },

    /// Filter the built search index the way the search box does
    Search {
        #[command(flatten)]
        args: SearchArgs,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Development build: drafts are listed and searchable
    #[arg(short, long)]
    pub dev: bool,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override the number of posts per listing page
    #[arg(short = 'n', long = "posts-per-page")]
    pub posts_per_page: Option<usize>,

    /// Override site URL (used by the sitemap)
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,
}

/// Search command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query text (matched case-insensitively against title and description)
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Index file to read (default: `{output}/{build.search.path}`)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub index: Option<PathBuf>,

    /// Print matching records as JSON
    #[arg(short, long)]
    pub json: bool,
}
