//! Words Context - 命名单词列表聚合

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GradeLevel, ListName, WordListError};

/// 已保存的单词列表
///
/// 不变量:
/// - 名称非空（已去除首尾空白）
/// - 至少包含一个单词，顺序即保存时的选择顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWordList {
    name: ListName,
    words: Vec<String>,
    grade: GradeLevel,
    created_at: DateTime<Utc>,
}

impl SavedWordList {
    /// 创建新列表
    pub fn new(name: ListName, words: Vec<String>, grade: GradeLevel) -> Result<Self, WordListError> {
        Self::restore(name, words, grade, Utc::now())
    }

    /// 从存储中恢复
    pub fn restore(
        name: ListName,
        words: Vec<String>,
        grade: GradeLevel,
        created_at: DateTime<Utc>,
    ) -> Result<Self, WordListError> {
        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self {
            name,
            words,
            grade,
            created_at,
        })
    }

    pub fn name(&self) -> &ListName {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn grade(&self) -> GradeLevel {
        self.grade
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 下拉框展示文本，如 `week 1 (12 words, Grade 2-3)`
    pub fn summary(&self) -> String {
        format!(
            "{} ({} words, Grade {})",
            self.name,
            self.words.len(),
            self.grade.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let list = SavedWordList::new(
            ListName::new("week 1").unwrap(),
            vec!["atom".into(), "bleach".into()],
            GradeLevel::Gr45,
        )
        .unwrap();
        assert_eq!(list.summary(), "week 1 (2 words, Grade 4-5)");
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = SavedWordList::new(ListName::new("empty").unwrap(), vec![], GradeLevel::Gr23)
            .unwrap_err();
        assert_eq!(err, WordListError::Empty);
    }
}
