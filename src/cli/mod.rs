use crate::core::Config;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "File-backed knowledge base renderer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content directory, overrides the configuration file
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a single page
    Page(PageArgs),

    /// Print the flat navigation tree
    Contents(ContentsArgs),

    /// Print one category of the nested navigation tree
    Category(CategoryArgs),

    /// Full-text search over all documents
    Search(SearchArgs),
}

#[derive(Args)]
pub struct PageArgs {
    /// Document path, relative to the content directory
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ContentsArgs {
    /// Slug of the page or category to mark active
    #[arg(short, long)]
    pub active: Option<String>,

    /// Print the nested tree instead of the flat category list
    #[arg(long)]
    pub nested: bool,
}

#[derive(Args)]
pub struct CategoryArgs {
    /// Category slug, e.g. `guides/setup`
    pub slug: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: String,
}

/// 读取配置文件并应用命令行覆盖项
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(content_dir) = &cli.content_dir {
        config.content_dir = content_dir.clone();
    }

    Ok(config)
}
