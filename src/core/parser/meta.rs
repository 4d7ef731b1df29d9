//! 元数据块解析模块
//!
//! 解析文档开头可选的元数据块，支持两种分隔写法：
//!
//! ```text
//! /*
//! Title: 页面标题
//! Sort: 2
//! */
//! ```
//!
//! ```text
//! ---
//! Title: 页面标题
//! Show On Home: false
//! ---
//! ```
//!
//! 只识别文档最前面的第一个块（允许 BOM），后面看起来像元数据块的内容
//! 一律当作正文。

use super::text::clean_string;
use anyhow::{Context, Result};
use tracing::warn;
use yaml_rust2::{Yaml, YamlLoader};

const BOM: char = '\u{feff}';

/// 元数据块的分隔风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaStyle {
    /// `/* ... */`
    Comment,
    /// `--- ... ---`
    Yaml,
}

impl MetaStyle {
    /// 按优先级排列的全部风格
    const ALL: [MetaStyle; 2] = [MetaStyle::Comment, MetaStyle::Yaml];

    fn match_block(self, content: &str) -> Option<MetaBlock<'_>> {
        match self {
            MetaStyle::Comment => {
                let body = content.strip_prefix("/*")?;
                let end = body.find("*/")?;
                Some(MetaBlock {
                    style: self,
                    raw: &body[..end],
                    remainder: &body[end + 2..],
                })
            }
            MetaStyle::Yaml => {
                let body = strip_line_break(content.strip_prefix("---")?)?;

                // 结束分隔符是第一条恰好为 `---` 的行，块内容可以为空
                let mut offset = 0;
                for line in body.split_inclusive('\n') {
                    if line.trim_end_matches(['\n', '\r']) == "---" {
                        return Some(MetaBlock {
                            style: self,
                            raw: &body[..offset],
                            remainder: &body[offset + line.len()..],
                        });
                    }
                    offset += line.len();
                }
                None
            }
        }
    }
}

/// 匹配到的元数据块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBlock<'a> {
    /// 分隔风格
    pub style: MetaStyle,
    /// 分隔符之间的原始文本
    pub raw: &'a str,
    /// 块之后的剩余内容
    pub remainder: &'a str,
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .or_else(|| s.strip_prefix('\r'))
}

/// 依次尝试每种分隔风格，返回第一个匹配的块
pub fn find_meta_block(content: &str) -> Option<MetaBlock<'_>> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    MetaStyle::ALL
        .into_iter()
        .find_map(|style| style.match_block(content))
}

/// 有序的元数据映射
///
/// 键已经过下划线模式的 [`clean_string`] 规范化，值保持原始字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入键值，同名键覆盖旧值但保留原位置
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 非空的 `title`
    pub fn title(&self) -> Option<&str> {
        self.get("title").filter(|t| !t.is_empty())
    }

    /// `description`，缺失时为空字符串
    pub fn description(&self) -> &str {
        self.get("description").unwrap_or("")
    }

    /// 读取整数字段
    ///
    /// 字段缺失返回 `None`；格式错误记录警告后同样返回 `None`，由调用方回退到默认值。
    pub fn integer(&self, key: &str) -> Option<i64> {
        let raw = self.get(key)?;
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed integer meta {}={:?}: {}", key, raw, e);
                None
            }
        }
    }

    /// 读取布尔字段，只接受 `true` / `false`（不区分大小写）
    pub fn flag(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        match raw.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                warn!("Ignoring malformed boolean meta {}={:?}", key, raw);
                None
            }
        }
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut meta = Metadata::new();
        for (key, value) in iter {
            meta.insert(key, value);
        }
        meta
    }
}

/// 解析文档开头的元数据块
///
/// 块内每行按第一个 `": "` 切分为键和值，不符合格式的行被忽略；
/// 没有元数据块时返回空映射。
pub fn process_meta(content: &str) -> Metadata {
    let mut meta = Metadata::new();
    let Some(block) = find_meta_block(content) else {
        return meta;
    };

    for line in block.raw.trim().lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        meta.insert(clean_string(key, true), value);
    }

    meta
}

/// 移除第一个元数据块及其周围空白
pub fn strip_meta(content: &str) -> String {
    match find_meta_block(content) {
        Some(block) => block.remainder.trim().to_string(),
        None => content.trim_start_matches(BOM).trim().to_string(),
    }
}

/// 解析目录下的 `meta` 文件（YAML 映射）
///
/// 标量值统一转成字符串，嵌套结构被忽略。
pub fn parse_meta_yaml(content: &str) -> Result<Metadata> {
    let docs = YamlLoader::load_from_str(content).context("Invalid YAML in meta file")?;
    let mut meta = Metadata::new();

    let Some(hash) = docs.first().and_then(Yaml::as_hash) else {
        return Ok(meta);
    };

    for (key, value) in hash {
        let Some(key) = yaml_scalar(key) else {
            continue;
        };
        if let Some(value) = yaml_scalar(value) {
            meta.insert(clean_string(&key, true), value);
        }
    }

    Ok(meta)
}

fn yaml_scalar(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Real(r) => Some(r.clone()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
