use super::*;
use crate::core::{build_contents, nest, resolve_category, resolve_page, search as search_pages};
use anyhow::Result;
use serde::Serialize;
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn page(args: PageArgs, config: &Config) -> Result<()> {
    let path = if args.path.is_absolute() {
        args.path
    } else {
        config.content_dir.join(&args.path)
    };

    match resolve_page(&path, config) {
        Some(page) => print_json(&page),
        None => anyhow::bail!("Whoops. Looks like this page doesn't exist: {:?}", path),
    }
}

pub fn contents(args: ContentsArgs, config: &Config) -> Result<()> {
    let categories = build_contents(args.active.as_deref(), config);
    info!("Built {} categories from {:?}", categories.len(), config.content_dir);

    if args.nested {
        print_json(&nest(categories))
    } else {
        print_json(&categories)
    }
}

pub fn category(args: CategoryArgs, config: &Config) -> Result<()> {
    let tree = nest(build_contents(Some(&args.slug), config));

    match resolve_category(&tree, &args.slug) {
        Some(category) => print_json(category),
        None => anyhow::bail!("No category found for {:?}", args.slug),
    }
}

pub fn search(args: SearchArgs, config: &Config) -> Result<()> {
    let results = search_pages(&args.query, config)?;
    info!("{} results for {:?}", results.len(), args.query);
    print_json(&results)
}
