//! Word Pool Port - 年级词库

use crate::domain::words::GradeLevel;

/// Word Pool Port
pub trait WordPoolPort: Send + Sync {
    /// 指定年级的全部单词
    fn words(&self, grade: GradeLevel) -> &[String];

    /// 大小写不敏感的子串过滤，空关键字返回全部
    fn search(&self, grade: GradeLevel, term: &str) -> Vec<String> {
        let term = term.trim().to_lowercase();
        self.words(grade)
            .iter()
            .filter(|w| term.is_empty() || w.to_lowercase().contains(&term))
            .cloned()
            .collect()
    }
}
