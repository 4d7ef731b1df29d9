//! CLI 参数解析测试

use clap::Parser;
use folio::cli::{load_config, Cli, Commands};

#[test]
fn test_cli_parse_page() {
    let args = vec!["folio", "page", "sub/example.md"];
    let cli = Cli::try_parse_from(&args).unwrap();
    if let Commands::Page(page_args) = cli.command {
        assert_eq!(page_args.path.to_string_lossy(), "sub/example.md");
    } else {
        panic!("expected page command");
    }
}

#[test]
fn test_cli_parse_contents() {
    let args = vec!["folio", "contents", "-a", "/sub/example", "--nested"];
    let cli = Cli::try_parse_from(&args).unwrap();
    if let Commands::Contents(contents_args) = cli.command {
        assert_eq!(contents_args.active.as_deref(), Some("/sub/example"));
        assert!(contents_args.nested);
    } else {
        panic!("expected contents command");
    }
}

#[test]
fn test_cli_parse_contents_defaults() {
    let args = vec!["folio", "contents"];
    let cli = Cli::try_parse_from(&args).unwrap();
    if let Commands::Contents(contents_args) = cli.command {
        assert!(contents_args.active.is_none());
        assert!(!contents_args.nested);
    } else {
        panic!("expected contents command");
    }
}

#[test]
fn test_cli_parse_category() {
    let args = vec!["folio", "category", "sub/sub2"];
    let cli = Cli::try_parse_from(&args).unwrap();
    assert!(matches!(cli.command, Commands::Category(ref a) if a.slug == "sub/sub2"));
}

#[test]
fn test_cli_parse_search() {
    let args = vec!["folio", "search", "hello world"];
    let cli = Cli::try_parse_from(&args).unwrap();
    if let Commands::Search(search_args) = cli.command {
        assert_eq!(search_args.query, "hello world");
    } else {
        panic!("expected search command");
    }
}

#[test]
fn test_cli_global_options() {
    let args = vec!["folio", "search", "x", "--content-dir", "/srv/kb", "-v"];
    let cli = Cli::try_parse_from(&args).unwrap();
    assert!(cli.verbose);
    assert!(cli.config.is_none());

    let config = load_config(&cli).unwrap();
    assert_eq!(config.content_dir.to_string_lossy(), "/srv/kb");
    assert_eq!(config.excerpt_length, 400);
}

#[test]
fn test_cli_missing_subcommand() {
    let args = vec!["folio"];
    assert!(Cli::try_parse_from(&args).is_err());
}
