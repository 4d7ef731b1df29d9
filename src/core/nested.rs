//! 嵌套目录树
//!
//! 把 [`build_contents`](crate::core::contents::build_contents) 产生的扁平分类列表
//! 按路径段转换为父子树，并支持按 slug 逐段定位分类。
//!
//! 树内部统一使用 `/` 作为路径段分隔符，与运行平台无关。

use crate::core::contents::{normalize_slug, Category, ROOT_SLUG};
use crate::core::page::Page;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// 嵌套树中的分类节点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedCategory {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub is_index: bool,
    pub class: String,
    pub sort: i64,
    pub show_on_home: bool,
    pub active: bool,
    /// 始终为 true
    pub is_directory: bool,
    /// 子分类在前，直接子页面在后
    pub files: Vec<NestedEntry>,
}

/// 嵌套树中的条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NestedEntry {
    Category(NestedCategory),
    Page(Page),
}

impl NestedCategory {
    fn from_category(category: Category, children: Vec<NestedCategory>) -> Self {
        let mut files: Vec<NestedEntry> = children.into_iter().map(NestedEntry::Category).collect();
        files.extend(category.files.into_iter().map(NestedEntry::Page));

        Self {
            slug: category.slug,
            title: category.title,
            description: category.description,
            is_index: category.is_index,
            class: category.class,
            sort: category.sort,
            show_on_home: category.show_on_home,
            active: category.active,
            is_directory: true,
            files,
        }
    }

    /// 直接子分类
    pub fn children(&self) -> impl Iterator<Item = &NestedCategory> {
        self.files.iter().filter_map(|entry| match entry {
            NestedEntry::Category(category) => Some(category),
            NestedEntry::Page(_) => None,
        })
    }

    /// 直接子页面
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.files.iter().filter_map(|entry| match entry {
            NestedEntry::Page(page) => Some(page),
            NestedEntry::Category(_) => None,
        })
    }

    fn to_category(&self) -> Category {
        Category {
            slug: self.slug.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            is_index: self.is_index,
            class: self.class.clone(),
            sort: self.sort,
            show_on_home: self.show_on_home,
            active: self.active,
            files: self.pages().cloned().collect(),
        }
    }
}

/// 父分类 slug（去掉最后一个路径段），单段 slug 没有父分类
fn parent_of(slug: &str) -> Option<&str> {
    slug.rsplit_once('/').map(|(parent, _)| parent)
}

/// 扁平分类列表 → 嵌套树
///
/// 找不到父分类的分类成为顶层节点；同级节点保持输入中的相对顺序。
pub fn nest(flat: Vec<Category>) -> Vec<NestedCategory> {
    let slugs: HashSet<String> = flat.iter().map(|c| c.slug.clone()).collect();

    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<Category>> = HashMap::new();

    for category in flat {
        let parent = parent_of(&category.slug)
            .filter(|parent| slugs.contains(*parent))
            .map(str::to_string);

        match parent {
            Some(parent) => children.entry(parent).or_default().push(category),
            None => roots.push(category),
        }
    }

    roots
        .into_iter()
        .map(|category| attach(category, &mut children))
        .collect()
}

fn attach(category: Category, children: &mut HashMap<String, Vec<Category>>) -> NestedCategory {
    let nested = children
        .remove(&category.slug)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, children))
        .collect();

    NestedCategory::from_category(category, nested)
}

/// 嵌套树 → 扁平分类列表（先序遍历）
pub fn flatten(tree: &[NestedCategory]) -> Vec<Category> {
    let mut flat = Vec::new();
    for node in tree {
        collect(node, &mut flat);
    }
    flat
}

fn collect(node: &NestedCategory, flat: &mut Vec<Category>) {
    flat.push(node.to_category());
    for child in node.children() {
        collect(child, flat);
    }
}

/// 在嵌套树中按 slug 定位分类
///
/// slug 的首尾分隔符会被去掉，`\` 视同 `/`；逐段向下查找，任一段不匹配即返回 `None`。
/// 空 slug 或 `.` 对应根分类。
pub fn resolve_category<'a>(tree: &'a [NestedCategory], slug: &str) -> Option<&'a NestedCategory> {
    let normalized = normalize_slug(slug);
    if normalized.is_empty() || normalized == ROOT_SLUG {
        return tree.iter().find(|node| node.is_index);
    }

    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    let mut level: Vec<&NestedCategory> = tree.iter().collect();
    let mut found = None;

    for depth in 0..segments.len() {
        let target = segments[..=depth].join("/");
        let node = level.iter().copied().find(|node| node.slug == target)?;
        level = node.children().collect();
        found = Some(node);
    }

    found
}
