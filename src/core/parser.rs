//! 内容处理模块
//!
//! - [`meta`] - 元数据块的识别、解析与移除
//! - [`text`] - slug/标题转换、变量替换、摘要

pub mod meta;
pub mod text;

pub use meta::{
    find_meta_block, parse_meta_yaml, process_meta, strip_meta, MetaBlock, MetaStyle, Metadata,
};
pub use text::{clean_string, excerpt, process_vars, prune, slug_to_title, strip_tags};
