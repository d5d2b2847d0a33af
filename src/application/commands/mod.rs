//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod dictation_commands;
mod word_list_commands;

pub mod handlers;

pub use dictation_commands::*;
pub use word_list_commands::*;
