//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod dictation_handlers;
mod word_list_handlers;

pub use dictation_handlers::*;
pub use word_list_handlers::*;
