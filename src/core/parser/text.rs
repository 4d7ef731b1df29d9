//! 文本处理工具
//!
//! slug / 标题转换、模板变量替换以及摘要生成用到的纯文本函数

use crate::core::config::Config;
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid tag regex"));

/// 规范化为 CSS 类名或元数据键可用的记号
///
/// 转小写并去掉首尾空白；路径分隔符、空白、`-` 和 `_` 组成的连续片段折叠为
/// 一个分隔符（默认 `-`，`use_underscore` 为 true 时为 `_`），驼峰边界同样插入分隔符。
pub fn clean_string(input: &str, use_underscore: bool) -> String {
    let sep = if use_underscore { '_' } else { '-' };
    let mut out = String::with_capacity(input.len());
    let mut pending = false;
    let mut prev: Option<char> = None;

    for c in input.trim().chars() {
        if c.is_whitespace() || matches!(c, '/' | '\\' | '-' | '_') {
            pending = true;
        } else {
            if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                pending = true;
            }
            if pending && !out.is_empty() {
                out.push(sep);
            }
            pending = false;
            out.extend(c.to_lowercase());
        }
        prev = Some(c);
    }

    out
}

/// 由 slug 或文件路径生成标题
///
/// `dir/some-example-file.md` → `Some Example File`
pub fn slug_to_title(slug: &str) -> String {
    let trimmed = slug.trim_end_matches(['/', '\\']);
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    let stem = match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    };

    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// 替换 `%base_url%`、`%image_url%` 以及自定义的 `%name%` 变量
///
/// 纯字面量替换，不涉及正则。
pub fn process_vars(content: &str, config: &Config) -> String {
    let mut out = content.to_string();

    if let Some(base_url) = &config.base_url {
        out = out.replace("%base_url%", base_url);
    }
    if let Some(image_url) = &config.image_url {
        out = out.replace("%image_url%", image_url);
    }
    for variable in &config.variables {
        out = out.replace(&format!("%{}%", variable.name), &variable.content);
    }

    out
}

/// 去掉 HTML 标签和注释
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// 还原常见的 HTML 实体
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// 在单词边界处截断到最多 `length` 个字符，截断时追加 `...`
pub fn prune(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let head: String = text.chars().take(length).collect();
    let next = text.chars().nth(length);

    // 截断点落在单词中间时回退到上一个空白
    let cut = match (head.chars().last(), next) {
        (Some(last), Some(next)) if last.is_alphanumeric() && next.is_alphanumeric() => {
            match head.rfind(char::is_whitespace) {
                Some(pos) => &head[..pos],
                None => "",
            }
        }
        _ => head.as_str(),
    };

    let cut = cut.trim_end();
    // 加上省略号后反而不短于原文时保留原文
    if cut.chars().count() + 3 > text.chars().count() {
        return text.to_string();
    }
    format!("{}...", cut)
}

/// 由渲染后的 HTML 生成纯文本摘要
///
/// 先还原实体再去标签，转义过的标签（如代码片段中的）也不会留在摘要里。
pub fn excerpt(html: &str, length: usize) -> String {
    let text = strip_tags(&unescape_html(html));
    prune(text.trim(), length)
}
