//! 集成测试共用的内容目录
//!
//! ```text
//! example-page.md
//! hidden-from-home.md        Sort: 5, Show On Home: false
//! page-with-bom-yaml.md
//! page-with-bom.md
//! russian.md
//! sub/example-sub-page.md
//! sub/sub2/sort              1
//! sub/sub2/deep-page.md
//! zz-no-home/meta            show_on_home: false, sort: 2
//! zz-no-home/page.md
//! private/ignore
//! private/secret.md
//! ```

#![allow(dead_code)]

use folio::core::Config;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn create_content(root: &Path) {
    write(root, "example-page.md", "This is some example content.\n\nSee %base_url%/other.");
    write(
        root,
        "hidden-from-home.md",
        "/*\nTitle: Hidden Page\nSort: 5\nShow On Home: false\n*/\nNot on the homepage.",
    );
    write(
        root,
        "page-with-bom.md",
        "\u{feff}/*\nTitle: Example Page With BOM\n*/\nAn example with a byte order mark.",
    );
    write(
        root,
        "page-with-bom-yaml.md",
        "\u{feff}---\nTitle: Example Page With BOM for YAML\n---\nAnother example with a byte order mark.",
    );
    write(
        root,
        "russian.md",
        "/*\nTitle: Русская страница\n*/\nЗдесь есть примеры текста.",
    );
    write(
        root,
        "sub/example-sub-page.md",
        "---\nTitle: Example Sub Page\n---\nAn example inside the sub directory.",
    );
    write(root, "sub/sub2/sort", "1\n");
    write(root, "sub/sub2/deep-page.md", "Deep content lives here.");
    write(root, "zz-no-home/meta", "show_on_home: false\nsort: 2\ndescription: Not for the homepage\n");
    write(root, "zz-no-home/page.md", "Nothing to see.");
    write(root, "private/ignore", "");
    write(root, "private/secret.md", "A secret example.");
}

pub fn config(root: &Path) -> Config {
    Config {
        base_url: Some(String::new()),
        image_url: Some("/images".to_string()),
        search_extra_languages: vec!["ru".to_string()],
        ..Config::with_content_dir(root)
    }
}
