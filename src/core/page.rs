//! 页面解析模块
//!
//! 由单个文档文件生成 [`Page`]：元数据、标题、渲染后的正文和摘要。

use crate::core::config::Config;
use crate::core::parser::{excerpt, process_meta, process_vars, slug_to_title, strip_meta, Metadata};
use crate::core::render::{MarkdownRenderer, Renderer};
use crate::storage::{Storage, DOCUMENT_EXTENSION};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// 页面
///
/// 每次请求即时构建，不做任何缓存。目录树中的页面不包含 `body` 和 `excerpt`。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// 去掉扩展名和末尾 `index` 的 `/` 分隔路径
    pub slug: String,
    pub title: String,
    /// 渲染后的 HTML
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// 纯文本摘要
    #[serde(skip_serializing_if = "String::is_empty")]
    pub excerpt: String,
    pub description: String,
    pub sort: i64,
    pub show_on_home: bool,
    pub active: bool,
    /// 按 `datetime_format` 格式化的最后修改时间
    pub last_modified: Option<String>,
}

impl Page {
    /// 由相对路径和元数据构建页面（不含正文）
    pub fn from_meta(relative: &str, meta: &Metadata, config: &Config) -> Self {
        let slug = page_slug(relative);
        let title = match meta.title() {
            Some(title) => title.to_string(),
            None if slug.is_empty() => slug_to_title(relative),
            None => slug_to_title(&slug),
        };

        Self {
            title,
            description: meta.description().to_string(),
            sort: page_sort(meta, config),
            show_on_home: meta
                .flag("show_on_home")
                .unwrap_or(config.show_on_home_default),
            slug,
            ..Self::default()
        }
    }
}

/// 由相对路径计算页面 slug
///
/// `sub/example.md` → `sub/example`，`sub/index.md` → `sub`，`index.md` → 空字符串
pub fn page_slug(relative: &str) -> String {
    let normalized = relative.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');
    let without_ext = normalized
        .strip_suffix(DOCUMENT_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(normalized);

    let slug = if without_ext == "index" {
        ""
    } else {
        without_ext.strip_suffix("/index").unwrap_or(without_ext)
    };

    slug.trim_matches('/').to_string()
}

/// 页面排序值：`page_sort_meta` 指定的元数据字段，缺失或无效时为 0
fn page_sort(meta: &Metadata, config: &Config) -> i64 {
    if config.page_sort_meta.is_empty() {
        return 0;
    }
    meta.integer(&config.page_sort_meta).unwrap_or(0)
}

/// 按 chrono strftime 格式化修改时间，格式串无效时返回 `None`
pub fn format_modified(time: SystemTime, format: &str) -> Option<String> {
    let datetime: DateTime<Local> = time.into();
    let mut out = String::new();
    write!(out, "{}", datetime.format(format)).ok()?;
    Some(out)
}

/// 解析单个页面
///
/// 文件不存在或读取失败时返回 `None`，调用方应将其视为"页面不存在"。
pub fn resolve_page(path: &Path, config: &Config) -> Option<Page> {
    resolve_page_with(path, config, &MarkdownRenderer)
}

/// 使用指定渲染器解析单个页面
pub fn resolve_page_with(path: &Path, config: &Config, renderer: &dyn Renderer) -> Option<Page> {
    match load_page(path, config, renderer) {
        Ok(page) => Some(page),
        Err(e) => {
            debug!("Page not resolved for {:?}: {:#}", path, e);
            None
        }
    }
}

fn load_page(path: &Path, config: &Config, renderer: &dyn Renderer) -> Result<Page> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read page {:?}", path))?;
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok();

    let storage = Storage::open(&config.content_dir);
    let relative = storage.relative_path(path);

    let meta = process_meta(&content);
    let markdown = process_vars(&strip_meta(&content), config);
    let body = renderer.render(&markdown);

    Ok(Page {
        excerpt: excerpt(&body, config.excerpt_length),
        body,
        last_modified: modified.and_then(|t| format_modified(t, &config.datetime_format)),
        ..Page::from_meta(&relative, &meta, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_page_slug() {
        assert_eq!(page_slug("example-page.md"), "example-page");
        assert_eq!(page_slug("sub/example-sub-page.md"), "sub/example-sub-page");
        assert_eq!(page_slug("sub/index.md"), "sub");
        assert_eq!(page_slug("index.md"), "");
        assert_eq!(page_slug("sub\\windows.md"), "sub/windows");
        assert_eq!(page_slug("/leading.md"), "leading");
        assert_eq!(page_slug("reindex.md"), "reindex");
    }

    #[test]
    fn test_from_meta_defaults() {
        let config = Config::default();
        let page = Page::from_meta("dir/some-example-file.md", &Metadata::new(), &config);
        assert_eq!(page.slug, "dir/some-example-file");
        assert_eq!(page.title, "Some Example File");
        assert_eq!(page.sort, 0);
        assert!(page.show_on_home);
        assert!(!page.active);

        let index = Page::from_meta("index.md", &Metadata::new(), &config);
        assert_eq!(index.title, "Index");
    }

    #[test]
    fn test_from_meta_overrides() {
        let config = Config {
            page_sort_meta: "order".to_string(),
            ..Config::default()
        };
        let meta = process_meta("/*\nTitle: Custom\nOrder: 7\nShow On Home: false\nDescription: d\n*/");
        let page = Page::from_meta("a.md", &meta, &config);
        assert_eq!(page.title, "Custom");
        assert_eq!(page.sort, 7);
        assert!(!page.show_on_home);
        assert_eq!(page.description, "d");
    }

    #[test]
    fn test_resolve_page() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            image_url: Some("/images".to_string()),
            ..Config::with_content_dir(temp_dir.path())
        };
        let path = temp_dir.path().join("example-page.md");
        fs::write(
            &path,
            "/*\nDescription: An example\n*/\n# Hello\n\nSee ![pic](%image_url%/a.png)",
        )
        .unwrap();

        let page = resolve_page(&path, &config).unwrap();
        assert_eq!(page.slug, "example-page");
        assert_eq!(page.title, "Example Page");
        assert_eq!(page.description, "An example");
        assert!(page.body.contains("<h1>Hello</h1>"));
        assert!(page.body.contains("/images/a.png"));
        assert!(!page.body.contains("Description"));
        assert!(page.excerpt.starts_with("Hello"));
        assert!(page.last_modified.is_some());
    }

    #[test]
    fn test_resolve_page_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_content_dir(temp_dir.path());
        assert!(resolve_page(&temp_dir.path().join("nonexistent-page.md"), &config).is_none());
    }

    #[test]
    fn test_resolve_page_excerpt_truncated() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            excerpt_length: 12,
            ..Config::with_content_dir(temp_dir.path())
        };
        let path = temp_dir.path().join("long.md");
        fs::write(&path, "alpha beta gamma delta").unwrap();

        let page = resolve_page(&path, &config).unwrap();
        assert_eq!(page.excerpt, "alpha beta...");
    }

    #[test]
    fn test_format_modified() {
        let formatted = format_modified(SystemTime::UNIX_EPOCH, "%Y").unwrap();
        assert!(formatted == "1970" || formatted == "1969");
    }
}
