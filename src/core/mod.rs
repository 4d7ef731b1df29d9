pub mod config;
pub mod contents;
pub mod indexer;
pub mod nested;
pub mod page;
pub mod parser;
pub mod render;

// 重新导出 config 模块中的公共 API
pub use config::{Config, Variable};

// 重新导出 parser 模块中的公共 API
pub use parser::{
    clean_string, process_meta, process_vars, slug_to_title, strip_meta, Metadata, MetaStyle,
};

// 重新导出页面、目录树与搜索的公共 API
pub use contents::{build_contents, Category};
pub use indexer::{search, SearchDocument, SearchHit, SearchIndex};
pub use nested::{flatten, nest, resolve_category, NestedCategory, NestedEntry};
pub use page::{resolve_page, resolve_page_with, Page};
pub use render::{MarkdownRenderer, Renderer};
