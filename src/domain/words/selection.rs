//! 抽词策略
//!
//! - 随机抽取：整表洗牌后截取前 `count` 个（无放回，顺序均匀随机）
//! - 自定义选择：原样使用，或 Fisher–Yates 洗牌

use rand::Rng;

use super::{SelectionError, WordSequence};

/// 从词库中无放回地随机抽取 `count` 个单词
///
/// `count` 必须在 `1..=pool.len()` 之内，否则返回 `InvalidCount`
pub fn select_random<R: Rng + ?Sized>(
    pool: &[String],
    count: usize,
    rng: &mut R,
) -> Result<WordSequence, SelectionError> {
    if count < 1 || count > pool.len() {
        return Err(SelectionError::InvalidCount {
            count,
            pool_size: pool.len(),
        });
    }

    let mut shuffled = pool.to_vec();
    shuffle(&mut shuffled, rng);
    shuffled.truncate(count);

    WordSequence::new(shuffled)
}

/// 使用调用方给定的单词集合
///
/// `shuffle_words = false` 时保持原顺序
pub fn use_custom_selection<R: Rng + ?Sized>(
    selected: &[String],
    shuffle_words: bool,
    rng: &mut R,
) -> Result<WordSequence, SelectionError> {
    if selected.is_empty() {
        return Err(SelectionError::EmptySelection);
    }

    let mut words = selected.to_vec();
    if shuffle_words {
        shuffle(&mut words, rng);
    }

    WordSequence::new(words)
}

/// Fisher–Yates 洗牌：i 从末尾递减到 1，与 [0, i] 中均匀选取的 j 交换
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_select_random_returns_distinct_words_from_pool() {
        let pool = pool(&["ankle", "atom", "boast", "candle", "daily", "eager", "fetch"]);
        let mut rng = StdRng::seed_from_u64(7);

        for count in 1..=pool.len() {
            let seq = select_random(&pool, count, &mut rng).unwrap();
            assert_eq!(seq.len(), count);

            let unique: HashSet<&String> = seq.as_slice().iter().collect();
            assert_eq!(unique.len(), count);
            assert!(seq.as_slice().iter().all(|w| pool.contains(w)));
        }
    }

    #[test]
    fn test_select_random_rejects_invalid_count() {
        let pool = pool(&["cat", "dog"]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            select_random(&pool, 0, &mut rng).unwrap_err(),
            SelectionError::InvalidCount { count: 0, pool_size: 2 }
        );
        assert_eq!(
            select_random(&pool, 3, &mut rng).unwrap_err(),
            SelectionError::InvalidCount { count: 3, pool_size: 2 }
        );
        assert!(select_random(&[], 1, &mut rng).is_err());
    }

    #[test]
    fn test_select_random_is_not_biased_toward_pool_order() {
        let pool = pool(&["a", "b", "c", "d", "e", "f"]);
        let mut rng = StdRng::seed_from_u64(42);
        let runs = 6000;
        let mut first: HashMap<String, usize> = HashMap::new();

        for _ in 0..runs {
            let seq = select_random(&pool, 3, &mut rng).unwrap();
            *first.entry(seq.as_slice()[0].clone()).or_default() += 1;
        }

        // 期望每个单词约 1000 次出现在首位
        for word in &pool {
            let hits = first.get(word).copied().unwrap_or(0);
            assert!((700..1300).contains(&hits), "{word} led {hits} times");
        }
    }

    #[test]
    fn test_custom_selection_without_shuffle_is_identity() {
        let selected = pool(&["zigzag", "abrupt", "bouquet", "abrupt"]);
        let mut rng = StdRng::seed_from_u64(3);

        let seq = use_custom_selection(&selected, false, &mut rng).unwrap();
        assert_eq!(seq.as_slice(), selected.as_slice());
    }

    #[test]
    fn test_custom_selection_rejects_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            use_custom_selection(&[], true, &mut rng).unwrap_err(),
            SelectionError::EmptySelection
        );
    }

    #[test]
    fn test_custom_shuffle_moves_every_word() {
        let selected = pool(&["w", "x", "y", "z"]);
        let mut rng = StdRng::seed_from_u64(2024);
        let runs = 4000;
        let mut positions: HashMap<(String, usize), usize> = HashMap::new();

        for _ in 0..runs {
            let seq = use_custom_selection(&selected, true, &mut rng).unwrap();
            let mut sorted = seq.as_slice().to_vec();
            sorted.sort();
            assert_eq!(sorted, selected);

            for (index, word) in seq.as_slice().iter().enumerate() {
                *positions.entry((word.clone(), index)).or_default() += 1;
            }
        }

        // 每个 (单词, 位置) 组合期望约 1000 次，没有单词被固定在某个位置
        for word in &selected {
            for index in 0..selected.len() {
                let hits = positions.get(&(word.clone(), index)).copied().unwrap_or(0);
                assert!((800..1200).contains(&hits), "{word}@{index}: {hits}");
            }
        }
    }

    #[test]
    fn test_shuffle_handles_short_slices() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![9];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![9]);
    }
}
