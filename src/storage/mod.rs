//! 内容存储模块
//!
//! 内容目录本身就是数据库：这里只提供只读的递归枚举能力，
//! 等价于 glob 的 `**/*`（全部文件与目录）和 `**/*.md`（仅文档）。
//!
//! 同一目录下的条目按文件名字典序排列，目录总是先于其子条目出现。
//! 隐藏条目（以 `.` 开头）以及含有 `ignore` 标记文件的目录（连同其子孙）不会被枚举。

use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// 文档文件扩展名
pub const DOCUMENT_EXTENSION: &str = "md";

/// 忽略标记文件名
pub const IGNORE_FILE: &str = "ignore";

/// 枚举得到的一个文件系统条目
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// 完整路径
    pub path: PathBuf,
    /// 相对内容根目录的路径，使用 `/` 分隔
    pub relative: String,
    pub is_dir: bool,
    pub is_file: bool,
    /// 最后修改时间
    pub modified: Option<SystemTime>,
}

impl ContentEntry {
    /// 是否为文档文件
    pub fn is_document(&self) -> bool {
        self.is_file && is_document_path(&self.path)
    }
}

/// 路径扩展名是否为文档扩展名
pub fn is_document_path(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION)
}

/// 内容目录
#[derive(Debug, Clone)]
pub struct Storage {
    /// 内容根路径
    root: PathBuf,
}

impl Storage {
    /// 打开内容目录
    ///
    /// 不要求目录存在，不存在时枚举结果为空。
    pub fn open(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// 内容根路径
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 递归列出全部条目（`**/*`）
    pub fn entries(&self) -> Vec<ContentEntry> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e) && !is_ignored_dir(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(self.to_content_entry(&entry)),
                Err(e) => {
                    warn!("Skipping unreadable entry under {:?}: {}", self.root, e);
                    None
                }
            })
            .collect()
    }

    /// 递归列出全部文档文件（`**/*.md`）
    pub fn documents(&self) -> Vec<ContentEntry> {
        self.entries()
            .into_iter()
            .filter(ContentEntry::is_document)
            .collect()
    }

    /// 计算相对内容根目录的路径（`/` 分隔）
    ///
    /// 路径不在内容目录下时原样返回。
    pub fn relative_path(&self, path: &Path) -> String {
        let relative = match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => pathdiff::diff_paths(path, &self.root)
                .filter(|rel| {
                    !rel.is_absolute()
                        && !rel.components().any(|c| matches!(c, Component::ParentDir))
                })
                .unwrap_or_else(|| path.to_path_buf()),
        };

        relative.to_string_lossy().replace('\\', "/")
    }

    fn to_content_entry(&self, entry: &DirEntry) -> ContentEntry {
        let file_type = entry.file_type();
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());

        ContentEntry {
            path: entry.path().to_path_buf(),
            relative: self.relative_path(entry.path()),
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
            modified,
        }
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.path().join(IGNORE_FILE).is_file()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
