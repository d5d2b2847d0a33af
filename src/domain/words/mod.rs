//! Words Context - 单词限界上下文
//!
//! 职责:
//! - 年级与听写词序列
//! - 抽词策略（随机抽取 / 自定义顺序或洗牌）
//! - 命名单词列表

mod errors;
mod selection;
mod value_objects;
mod word_list;

pub use errors::{SelectionError, WordListError};
pub use selection::{select_random, shuffle, use_custom_selection};
pub use value_objects::{GradeLevel, ListName, WordSequence};
pub use word_list::SavedWordList;
