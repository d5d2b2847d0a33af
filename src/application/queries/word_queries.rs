//! Word Queries - 词库与单词表查询

use chrono::{DateTime, Utc};

use crate::domain::words::{GradeLevel, SavedWordList};

/// 获取年级词库查询
#[derive(Debug, Clone)]
pub struct GetWordPool {
    pub grade: GradeLevel,
    /// 过滤关键字（大小写不敏感子串）
    pub search: Option<String>,
}

/// 年级词库响应
#[derive(Debug, Clone)]
pub struct WordPoolResponse {
    pub grade: GradeLevel,
    pub words: Vec<String>,
    /// 过滤前的词库大小
    pub pool_size: usize,
}

/// 加载单词表查询
#[derive(Debug, Clone)]
pub struct LoadWordList {
    pub name: String,
}

/// 列出所有单词表查询
#[derive(Debug, Clone)]
pub struct ListWordLists;

/// 单词表摘要
#[derive(Debug, Clone)]
pub struct WordListSummary {
    pub name: String,
    pub summary: String,
    pub word_count: usize,
    pub grade: GradeLevel,
    pub created_at: DateTime<Utc>,
}

impl From<&SavedWordList> for WordListSummary {
    fn from(list: &SavedWordList) -> Self {
        Self {
            name: list.name().to_string(),
            summary: list.summary(),
            word_count: list.words().len(),
            grade: list.grade(),
            created_at: list.created_at(),
        }
    }
}
