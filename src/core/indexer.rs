//! 搜索索引模块
//!
//! 每次搜索都从当前内容目录重新构建一个内存中的全文索引（tantivy）
//!
//! ## 功能
//!
//! - `title` 字段加权（[`TITLE_BOOST`]），标题命中排在仅正文命中之前
//! - 默认英语词干提取，可通过 `search_extra_languages` 追加其他语言
//! - 结果按相关度降序，相同分数按文档加入顺序
//! - 命中结果解析为完整页面，摘要中的查询词加上高亮标记

use crate::core::config::Config;
use crate::core::page::{resolve_page, Page};
use crate::core::parser::{process_meta, strip_tags};
use crate::storage::Storage;
use anyhow::Result;
use regex::RegexBuilder;
use serde::Serialize;
use std::fs;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, STORED, STRING,
};
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer,
};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use tracing::{debug, warn};

/// 标题字段权重
pub const TITLE_BOOST: f32 = 10.0;

/// 自定义分词器名称
const TOKENIZER: &str = "folio";

/// 索引写入内存预算
const WRITER_MEMORY_BYTES: usize = 50_000_000;

/// 待索引的文档
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDocument {
    /// 带扩展名的相对路径
    pub id: String,
    pub title: String,
    /// 原始文本（包含元数据块）
    pub body: String,
}

/// 搜索命中
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// 对应 [`SearchDocument::id`]
    pub reference: String,
    pub score: f32,
}

/// 索引汇总
#[derive(Debug, Default)]
pub struct IndexSummary {
    /// 索引的文档数
    pub documents_indexed: usize,
    /// 错误列表（路径, 错误信息）
    pub errors: Vec<(String, String)>,
}

impl IndexSummary {
    /// 检查是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// 把语言标记（`ru`、`german` 等）映射为 tantivy 的词干语言
pub fn parse_language(tag: &str) -> Option<Language> {
    let language = match tag.trim().to_lowercase().as_str() {
        "ar" | "arabic" => Language::Arabic,
        "da" | "danish" => Language::Danish,
        "nl" | "dutch" => Language::Dutch,
        "en" | "english" => Language::English,
        "fi" | "finnish" => Language::Finnish,
        "fr" | "french" => Language::French,
        "de" | "german" => Language::German,
        "el" | "greek" => Language::Greek,
        "hu" | "hungarian" => Language::Hungarian,
        "it" | "italian" => Language::Italian,
        "no" | "nb" | "norwegian" => Language::Norwegian,
        "pt" | "portuguese" => Language::Portuguese,
        "ro" | "romanian" => Language::Romanian,
        "ru" | "russian" => Language::Russian,
        "es" | "spanish" => Language::Spanish,
        "sv" | "swedish" => Language::Swedish,
        "ta" | "tamil" => Language::Tamil,
        "tr" | "turkish" => Language::Turkish,
        _ => return None,
    };
    Some(language)
}

/// 解析配置中的额外语言，无法识别的标记记录警告后忽略
pub fn extra_languages(config: &Config) -> Vec<Language> {
    config
        .search_extra_languages
        .iter()
        .filter_map(|tag| {
            let language = parse_language(tag);
            if language.is_none() {
                warn!("Unsupported search language {:?}, ignoring", tag);
            }
            language
        })
        .collect()
}

/// 分词链：简单分词 → 去除超长词 → 小写 → 英语词干 → 各额外语言词干
fn build_analyzer(languages: &[Language]) -> TextAnalyzer {
    let mut builder = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(40))
        .filter(LowerCaser)
        .filter(Stemmer::new(Language::English))
        .dynamic();

    for &language in languages.iter().filter(|l| **l != Language::English) {
        builder = builder.filter_dynamic(Stemmer::new(language));
    }

    builder.build()
}

/// 内存全文索引
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    id: Field,
    title: Field,
    body: Field,
    summary: IndexSummary,
}

impl SearchIndex {
    /// 由文档集合构建索引
    ///
    /// 单个文档写入失败只记入汇总，不影响其他文档。
    pub fn from_documents<I>(documents: I, languages: &[Language]) -> Result<Self>
    where
        I: IntoIterator<Item = SearchDocument>,
    {
        let mut schema_builder = Schema::builder();
        let text_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let id = schema_builder.add_text_field("id", STRING | STORED);
        let title = schema_builder.add_text_field("title", text_options.clone());
        let body = schema_builder.add_text_field("body", text_options);

        let index = Index::create_in_ram(schema_builder.build());
        index
            .tokenizers()
            .register(TOKENIZER, build_analyzer(languages));

        // 单线程写入保证文档顺序稳定
        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BYTES)?;
        let mut summary = IndexSummary::default();

        for document in documents {
            let added = writer.add_document(doc!(
                id => document.id.as_str(),
                title => document.title.as_str(),
                body => document.body.as_str()
            ));
            match added {
                Ok(_) => summary.documents_indexed += 1,
                Err(e) => {
                    warn!("Failed to index {:?}: {}", document.id, e);
                    summary.errors.push((document.id, e.to_string()));
                }
            }
        }

        writer.commit()?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self {
            index,
            reader,
            id,
            title,
            body,
            summary,
        })
    }

    /// 索引内容目录下的全部文档
    pub fn build(config: &Config) -> Result<Self> {
        let storage = Storage::open(&config.content_dir);
        let mut documents = Vec::new();

        for entry in storage.documents() {
            let content = match fs::read_to_string(&entry.path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable document {:?}: {}", entry.relative, e);
                    continue;
                }
            };

            let meta = process_meta(&content);
            documents.push(SearchDocument {
                title: Page::from_meta(&entry.relative, &meta, config).title,
                id: entry.relative,
                body: content,
            });
        }

        let index = Self::from_documents(documents, &extra_languages(config))?;
        debug!(
            "Indexed {} documents under {:?}",
            index.summary.documents_indexed, config.content_dir
        );
        Ok(index)
    }

    /// 索引汇总
    pub fn summary(&self) -> &IndexSummary {
        &self.summary
    }

    /// 索引中的文档数
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// 执行查询，按分数降序返回全部命中
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut parser = QueryParser::for_index(&self.index, vec![self.title, self.body]);
        parser.set_field_boost(self.title, TITLE_BOOST);
        let (parsed, errors) = parser.parse_query_lenient(query);
        for error in errors {
            debug!("Lenient query parse of {:?}: {}", query, error);
        }

        let searcher = self.reader.searcher();
        let limit = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX).max(1);
        let top_docs = searcher.search(&parsed, &TopDocs::with_limit(limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            let reference = doc
                .get_first(self.id)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            hits.push((address, SearchHit { reference, score }));
        }

        hits.sort_by(|(a_addr, a), (b_addr, b)| {
            b.score.total_cmp(&a.score).then_with(|| a_addr.cmp(b_addr))
        });

        Ok(hits.into_iter().map(|(_, hit)| hit).collect())
    }
}

/// 清理用户输入的查询：去掉标签并去除首尾空白
pub fn sanitize_query(query: &str) -> String {
    strip_tags(query).trim().to_string()
}

/// 用 `<span class="search-query">` 包裹文本中出现的查询串（不区分大小写）
pub fn highlight(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }

    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re
            .replace_all(text, r#"<span class="search-query">$0</span>"#)
            .into_owned(),
        Err(e) => {
            debug!("Highlighting disabled for {:?}: {}", query, e);
            text.to_string()
        }
    }
}

/// 搜索内容目录
///
/// 空查询或没有命中时返回空列表。命中的文档若已无法解析为页面则被跳过。
pub fn search(query: &str, config: &Config) -> Result<Vec<Page>> {
    let query = sanitize_query(query);
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let index = SearchIndex::build(config)?;
    let hits = index.search(&query)?;

    let pages = hits
        .into_iter()
        .filter_map(|hit| {
            let mut page = resolve_page(&config.content_dir.join(&hit.reference), config)?;
            page.excerpt = highlight(&page.excerpt, &query);
            Some(page)
        })
        .collect();

    Ok(pages)
}
