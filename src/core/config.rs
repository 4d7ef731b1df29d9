//! 知识库配置模块
//!
//! 每次构建目录树、解析页面或执行搜索时都显式传入一个 [`Config`]，
//! 不存在任何全局状态。
//!
//! ## 配置格式
//!
//! ```toml
//! content_dir = "content"
//! base_url = "/docs"
//! image_url = "/docs/images"
//! excerpt_length = 400
//! page_sort_meta = "sort"
//! category_sort = true
//! show_on_home_default = true
//! search_extra_languages = ["ru"]
//!
//! [[variables]]
//! name = "company"
//! content = "ACME"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 自定义模板变量
///
/// 正文中的 `%name%` 会被替换为 `content`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub content: String,
}

/// 知识库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 站点根 URL，替换 `%base_url%`
    pub base_url: Option<String>,

    /// 图片根 URL，替换 `%image_url%`
    pub image_url: Option<String>,

    /// 摘要最大字符数
    pub excerpt_length: usize,

    /// 作为页面排序值的元数据键名（空字符串表示不启用）
    pub page_sort_meta: String,

    /// 是否读取目录下的 `sort` 文件
    pub category_sort: bool,

    /// 缺少元数据时 `show_on_home` 的默认值
    pub show_on_home_default: bool,

    /// 额外的搜索语言（如 `ru`、`de`），英语始终启用
    #[serde(alias = "searchExtraLanguages")]
    pub search_extra_languages: Vec<String>,

    /// 内容根目录
    pub content_dir: PathBuf,

    /// 自定义变量
    pub variables: Vec<Variable>,

    /// 最后修改时间的格式（chrono strftime 语法）
    pub datetime_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            image_url: None,
            excerpt_length: 400,
            page_sort_meta: "sort".to_string(),
            category_sort: true,
            show_on_home_default: true,
            search_extra_languages: Vec::new(),
            content_dir: PathBuf::from("content"),
            variables: Vec::new(),
            datetime_format: "%-d %b %Y".to_string(),
        }
    }
}

impl Config {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定内容目录的默认配置
    pub fn with_content_dir(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            ..Self::default()
        }
    }

    /// 从文件加载配置
    ///
    /// `.json` 文件按 JSON 解析，其余按 TOML 解析。
    /// 与监听配置不同，这里的解析错误会直接返回给调用方。
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config {:?}", path))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML config {:?}", path))?,
        };

        Ok(config)
    }
}
