//! matchergen CLI tool.
//!
//! Usage:
//! ```bash
//! matchergen -t T1,T2 [-o output.rs] [--tags F1,F2] [PATHS]...
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config_resolver;
mod generate;

/// Generates test matchers from the accessor methods of Rust types
#[derive(Parser, Debug)]
#[command(name = "matchergen")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "matchergen [flags] -t T [directory]\n       matchergen [flags] -t T files... # Must be a single package")]
pub struct Cli {
    /// Comma-separated list of type names
    #[arg(short = 't', long = "type", value_delimiter = ',', required = true)]
    pub types: Vec<String>,

    /// Output file name (default: <dir>/<type>_matcher.rs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated list of features to apply when reading sources
    #[arg(long, visible_alias = "features", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Module the generated file imports target types from
    #[arg(long)]
    pub source_module: Option<String>,

    /// Path of the comparator runtime crate used by the generated code
    #[arg(long)]
    pub runtime: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// A single directory, or the `.rs` files of one module
    pub paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let source = config_resolver::resolve(std::path::Path::new("."), cli.config.as_deref());
    generate::run(&cli, &source)
}
