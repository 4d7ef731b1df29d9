//! 目录树构建与嵌套树测试

mod common;

use folio::core::{build_contents, flatten, nest, resolve_category, Config};
use tempfile::TempDir;

fn setup() -> (TempDir, Config) {
    let temp_dir = TempDir::new().unwrap();
    common::create_content(temp_dir.path());
    let config = common::config(temp_dir.path());
    (temp_dir, config)
}

#[test]
fn test_root_category_first() {
    let (_temp_dir, config) = setup();
    let contents = build_contents(None, &config);

    assert!(contents[0].is_index);
    assert_eq!(contents[0].slug, ".");
    assert_eq!(contents[0].class, "category-index");
    assert!(contents.iter().skip(1).all(|c| !c.is_index));
}

#[test]
fn test_categories_sorted_and_ignored_skipped() {
    let (_temp_dir, config) = setup();
    let slugs: Vec<_> = build_contents(None, &config)
        .into_iter()
        .map(|c| c.slug)
        .collect();

    assert_eq!(slugs, vec![".", "sub", "sub/sub2", "zz-no-home"]);
}

#[test]
fn test_root_files_sorted() {
    let (_temp_dir, config) = setup();
    let contents = build_contents(None, &config);
    let slugs: Vec<_> = contents[0].files.iter().map(|p| p.slug.as_str()).collect();

    assert_eq!(
        slugs,
        vec![
            "example-page",
            "page-with-bom-yaml",
            "page-with-bom",
            "russian",
            "hidden-from-home",
        ]
    );
    assert_eq!(contents[0].files[4].title, "Hidden Page");
    assert_eq!(contents[0].files[4].sort, 5);
    assert!(!contents[0].files[4].show_on_home);
    assert!(contents[0].files[0].show_on_home);
}

#[test]
fn test_listed_pages_have_no_body() {
    let (_temp_dir, config) = setup();
    let contents = build_contents(None, &config);

    let page = &contents[0].files[0];
    assert_eq!(page.title, "Example Page");
    assert!(page.body.is_empty());
    assert!(page.excerpt.is_empty());
    assert!(page.last_modified.is_some());
}

#[test]
fn test_directory_meta() {
    let (_temp_dir, config) = setup();
    let contents = build_contents(None, &config);

    let no_home = &contents[3];
    assert_eq!(no_home.slug, "zz-no-home");
    assert_eq!(no_home.title, "Zz No Home");
    assert_eq!(no_home.description, "Not for the homepage");
    assert_eq!(no_home.sort, 2);
    assert!(!no_home.show_on_home);
    assert!(contents[1].show_on_home);
}

#[test]
fn test_show_on_home_default_disabled() {
    let (_temp_dir, config) = setup();
    let config = Config {
        show_on_home_default: false,
        ..config
    };
    let contents = build_contents(None, &config);

    assert!(contents[0].show_on_home);
    assert!(!contents[1].show_on_home);
    assert!(!contents[0].files[0].show_on_home);
}

#[test]
fn test_active_page_marks_category() {
    let (_temp_dir, config) = setup();

    let contents = build_contents(Some("/example-page"), &config);
    assert!(contents[0].active);
    assert!(contents[0].files[0].active);
    assert!(contents[0].files.iter().skip(1).all(|p| !p.active));
    assert!(contents.iter().skip(1).all(|c| !c.active));

    let contents = build_contents(Some("sub/example-sub-page"), &config);
    assert!(!contents[0].active);
    assert!(contents[1].active);
    assert!(contents[1].files[0].active);
}

#[test]
fn test_nested_tree() {
    let (_temp_dir, config) = setup();
    let tree = nest(build_contents(None, &config));

    let top: Vec<_> = tree.iter().map(|n| n.slug.as_str()).collect();
    assert_eq!(top, vec![".", "sub", "zz-no-home"]);

    let sub = &tree[1];
    let children: Vec<_> = sub.children().map(|n| n.slug.as_str()).collect();
    assert_eq!(children, vec!["sub/sub2"]);
    assert_eq!(sub.pages().count(), 1);
    assert!(tree.iter().all(|n| n.is_directory));
}

#[test]
fn test_nested_tree_flattens_back() {
    let (_temp_dir, config) = setup();
    let flat = build_contents(None, &config);

    assert_eq!(flatten(&nest(flat.clone())), flat);
}

#[test]
fn test_resolve_category() {
    let (_temp_dir, config) = setup();
    let tree = nest(build_contents(None, &config));

    let found = resolve_category(&tree, "/sub/sub2/").unwrap();
    assert_eq!(found.slug, "sub/sub2");
    assert_eq!(found.pages().next().unwrap().slug, "sub/sub2/deep-page");

    assert!(resolve_category(&tree, "").unwrap().is_index);
    assert!(resolve_category(&tree, "/sub/nonexistent").is_none());
    assert!(resolve_category(&tree, "private").is_none());
}
