//! Static Word Pool - 年级词库
//!
//! 内置 gr23 / gr45 两个词库，可由目录中的 `{grade}.txt` 覆盖

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::application::ports::WordPoolPort;
use crate::domain::words::GradeLevel;

const BUILTIN_GR23: &str = include_str!("../../../words/gr23.txt");
const BUILTIN_GR45: &str = include_str!("../../../words/gr45.txt");

/// 进程内只读词库
pub struct StaticWordPool {
    pools: HashMap<GradeLevel, Vec<String>>,
}

impl StaticWordPool {
    /// 内置词库
    pub fn builtin() -> Self {
        let pools = GradeLevel::ALL
            .into_iter()
            .map(|grade| (grade, parse_words(builtin_text(grade))))
            .collect();
        Self { pools }
    }

    /// 从目录加载，缺失或为空的年级使用内置词库
    pub fn from_dir(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref();
        let mut pools = HashMap::new();

        for grade in GradeLevel::ALL {
            let path = dir.join(format!("{}.txt", grade.as_str()));
            let words = if path.is_file() {
                let words = parse_words(&std::fs::read_to_string(&path)?);
                if words.is_empty() {
                    tracing::warn!(path = %path.display(), "Word file is empty, using built-in list");
                    parse_words(builtin_text(grade))
                } else {
                    tracing::info!(grade = %grade, count = words.len(), path = %path.display(), "Loaded word pool");
                    words
                }
            } else {
                parse_words(builtin_text(grade))
            };
            pools.insert(grade, words);
        }

        Ok(Self { pools })
    }

    /// 各年级词数
    pub fn sizes(&self) -> Vec<(GradeLevel, usize)> {
        GradeLevel::ALL
            .into_iter()
            .map(|grade| (grade, self.words(grade).len()))
            .collect()
    }
}

impl WordPoolPort for StaticWordPool {
    fn words(&self, grade: GradeLevel) -> &[String] {
        self.pools.get(&grade).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn builtin_text(grade: GradeLevel) -> &'static str {
    match grade {
        GradeLevel::Gr23 => BUILTIN_GR23,
        GradeLevel::Gr45 => BUILTIN_GR45,
    }
}

/// 每行一个单词，忽略空行和 `#` 注释
///
/// 重复单词（不区分大小写）只保留第一次出现的位置，随机抽词依赖词库无重复
fn parse_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|word| seen.insert(word.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::words::select_random;

    #[test]
    fn test_builtin_pool_sizes() {
        let pool = StaticWordPool::builtin();
        assert_eq!(pool.words(GradeLevel::Gr23).len(), 600);
        assert_eq!(pool.words(GradeLevel::Gr45).len(), 800);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let pool = StaticWordPool::builtin();
        let hits = pool.search(GradeLevel::Gr23, "ABNORM");
        assert!(hits.contains(&"abnormal".to_string()));
        assert!(hits.iter().all(|w| w.to_lowercase().contains("abnorm")));
        assert_eq!(pool.search(GradeLevel::Gr23, "  ").len(), 600);
    }

    #[test]
    fn test_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gr45.txt"), "# custom\nzebra\n\n yak \n").unwrap();

        let pool = StaticWordPool::from_dir(dir.path()).unwrap();
        assert_eq!(pool.words(GradeLevel::Gr45), &["zebra".to_string(), "yak".to_string()]);
        assert_eq!(pool.words(GradeLevel::Gr23).len(), 600);
    }

    #[test]
    fn test_dir_override_drops_repeated_words() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gr23.txt"), "cat\ndog\ncat\n Dog \nemu\n").unwrap();

        let pool = StaticWordPool::from_dir(dir.path()).unwrap();
        let words = pool.words(GradeLevel::Gr23);
        assert_eq!(words, &["cat".to_string(), "dog".to_string(), "emu".to_string()]);

        let selected = select_random(words, 3, &mut rand::rng()).unwrap();
        let distinct: HashSet<_> = selected.as_slice().iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_repeated_only_file_yields_single_word() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gr23.txt"), "cat\ncat\n").unwrap();

        let pool = StaticWordPool::from_dir(dir.path()).unwrap();
        assert_eq!(pool.words(GradeLevel::Gr23), &["cat".to_string()]);
        assert!(select_random(pool.words(GradeLevel::Gr23), 2, &mut rand::rng()).is_err());
    }
}
