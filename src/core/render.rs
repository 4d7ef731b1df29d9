//! Markdown 渲染
//!
//! 渲染器被视为纯函数 `render(text) -> html`，通过 [`Renderer`] trait 注入，
//! 默认实现基于 pulldown-cmark。

use pulldown_cmark::{html, Options, Parser};

/// Markdown → HTML 渲染器
pub trait Renderer {
    fn render(&self, markdown: &str) -> String;
}

/// 基于 pulldown-cmark 的默认渲染器（启用表格、脚注、删除线和任务列表）
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl<F> Renderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_renderer() {
        let html = MarkdownRenderer.render("# Title\n\nSome *text*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_closure_renderer() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.render("abc"), "ABC");
    }
}
