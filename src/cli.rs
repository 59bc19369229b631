//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Search an Unsplash-compatible image API and download selected images.
///
/// Run with a query for a one-shot search, or without one to start an
/// interactive session. The API access key is read from the
/// IMGFETCH_ACCESS_KEY environment variable.
#[derive(Parser, Debug)]
#[command(name = "imgfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Search query; omit to start an interactive session
    pub query: Option<String>,

    /// Number of result pages to fetch up front (1-50)
    #[arg(short = 'p', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub pages: u32,

    /// Download the numbered result after fetching (1-based)
    #[arg(short = 'd', long, value_name = "INDEX")]
    pub download: Option<usize>,

    /// Directory to save downloaded images into
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Stay in an interactive session after the initial search
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
