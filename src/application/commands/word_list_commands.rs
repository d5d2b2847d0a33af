//! Word List Commands - 单词表相关命令

use crate::domain::words::GradeLevel;

/// 保存单词表命令
#[derive(Debug, Clone)]
pub struct SaveWordList {
    pub name: String,
    pub words: Vec<String>,
    pub grade: GradeLevel,
    /// 同名单词表已存在时是否覆盖
    pub overwrite: bool,
}

/// 删除单词表命令
#[derive(Debug, Clone)]
pub struct DeleteWordList {
    pub name: String,
}
