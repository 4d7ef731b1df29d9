//! 目录树构建模块
//!
//! 遍历内容目录，生成扁平的 [`Category`] 列表，每个分类持有其直接子页面。
//!
//! 构建分两遍完成：
//!
//! 1. 为每个目录生成分类
//! 2. 按父目录 slug 查表，把文档挂到对应分类下
//!
//! 目录下可选的辅助文件：
//!
//! - `sort` - 单个整数，作为分类排序值（`category_sort` 开启时生效）
//! - `meta` - YAML 映射，可设置 `title`、`description`、`sort`、`show_on_home`
//!
//! 带 `ignore` 标记的目录在枚举阶段就已被排除，见 [`crate::storage`]。

use crate::core::config::Config;
use crate::core::page::{format_modified, Page};
use crate::core::parser::{clean_string, parse_meta_yaml, process_meta, slug_to_title, Metadata};
use crate::storage::{ContentEntry, Storage};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// 根分类的 slug
pub const ROOT_SLUG: &str = ".";
/// 分类排序文件名
pub const SORT_FILE: &str = "sort";
/// 目录元数据文件名
pub const META_FILE: &str = "meta";

/// 分类（目录）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Category {
    /// 目录相对路径，根分类为 `.`
    pub slug: String,
    pub title: String,
    pub description: String,
    /// 仅根分类为 true
    pub is_index: bool,
    /// CSS 类名
    pub class: String,
    pub sort: i64,
    pub show_on_home: bool,
    pub active: bool,
    /// 直接子页面
    pub files: Vec<Page>,
}

impl Category {
    /// 合成的根分类，始终在首位且始终显示在首页
    pub fn root() -> Self {
        Self {
            slug: ROOT_SLUG.to_string(),
            is_index: true,
            class: "category-index".to_string(),
            show_on_home: true,
            ..Self::default()
        }
    }
}

/// 规范化 slug：统一为 `/` 分隔并去掉首尾分隔符
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().replace('\\', "/").trim_matches('/').to_string()
}

/// 构建扁平的分类列表
///
/// `active_slug` 对应的页面以及持有它（或 slug 与之相同）的分类会被标记为 active。
/// 单个文件或目录的读取失败只记录日志，不影响整体构建。
pub fn build_contents(active_slug: Option<&str>, config: &Config) -> Vec<Category> {
    let storage = Storage::open(&config.content_dir);
    let entries = storage.entries();

    let mut categories = vec![Category::root()];
    categories.extend(
        entries
            .iter()
            .filter(|e| e.is_dir)
            .map(|entry| load_category(entry, config)),
    );

    let index: HashMap<String, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| (category.slug.clone(), i))
        .collect();

    for entry in entries.iter().filter(|e| e.is_document()) {
        let parent = parent_slug(&entry.relative);
        let Some(&position) = index.get(parent) else {
            warn!("Skipping {:?}: no category for {:?}", entry.relative, parent);
            continue;
        };

        match load_listed_page(entry, config) {
            Ok(page) => categories[position].files.push(page),
            Err(e) => warn!("Skipping page {:?}: {:#}", entry.relative, e),
        }
    }

    if let Some(active) = active_slug.map(normalize_slug) {
        mark_active(&mut categories, &active);
    }

    // 根分类固定在首位，其余分类按排序值稳定排序
    categories[1..].sort_by_key(|category| category.sort);
    for category in &mut categories {
        category.files.sort_by_key(|page| page.sort);
    }

    categories
}

/// 文件所在目录的分类 slug
fn parent_slug(relative: &str) -> &str {
    match relative.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => ROOT_SLUG,
    }
}

fn mark_active(categories: &mut [Category], active: &str) {
    for category in categories {
        let mut holds_active = false;
        for page in &mut category.files {
            page.active = page.slug == active;
            holds_active |= page.active;
        }
        category.active = holds_active || category.slug == active;
    }
}

fn load_category(entry: &ContentEntry, config: &Config) -> Category {
    let slug = entry.relative.clone();
    let meta = read_dir_meta(&entry.path);

    let sort = meta
        .integer("sort")
        .or_else(|| {
            if config.category_sort {
                read_sort_file(&entry.path)
            } else {
                None
            }
        })
        .unwrap_or(0);

    Category {
        title: meta
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| slug_to_title(&slug)),
        description: meta.description().to_string(),
        is_index: false,
        class: format!("category-{}", clean_string(&slug, false)),
        sort,
        show_on_home: meta
            .flag("show_on_home")
            .unwrap_or(config.show_on_home_default),
        active: false,
        files: Vec::new(),
        slug,
    }
}

/// 读取目录的 `meta` 文件，缺失或无效时返回空元数据
fn read_dir_meta(dir: &Path) -> Metadata {
    let path = dir.join(META_FILE);
    if !path.is_file() {
        return Metadata::new();
    }

    match fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|content| parse_meta_yaml(&content))
    {
        Ok(meta) => meta,
        Err(e) => {
            warn!("Ignoring directory meta {:?}: {:#}", path, e);
            Metadata::new()
        }
    }
}

/// 读取目录的 `sort` 文件，缺失时静默返回 `None`，格式错误时记录警告
fn read_sort_file(dir: &Path) -> Option<i64> {
    let path = dir.join(SORT_FILE);
    if !path.is_file() {
        return None;
    }

    let parsed = fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|content| {
            content
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid sort value {:?}", content.trim()))
        });

    match parsed {
        Ok(sort) => Some(sort),
        Err(e) => {
            warn!("Ignoring sort file {:?}: {:#}", path, e);
            None
        }
    }
}

fn load_listed_page(entry: &ContentEntry, config: &Config) -> Result<Page> {
    let content = fs::read_to_string(&entry.path)
        .with_context(|| format!("Failed to read {:?}", entry.path))?;
    let meta = process_meta(&content);

    Ok(Page {
        last_modified: entry
            .modified
            .and_then(|t| format_modified(t, &config.datetime_format)),
        ..Page::from_meta(&entry.relative, &meta, config)
    })
}
