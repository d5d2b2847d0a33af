//! Session Context - 听写会话限界上下文
//!
//! 职责:
//! - 会话状态机（Idle → Running ⇄ Paused → Completed）
//! - 倒计时与导航语义
//! - 产出副作用（朗读、静音、启停节拍），由应用层执行

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{DictationSession, COMPLETION_TEXT};
pub use errors::SessionError;
pub use value_objects::{
    IntervalSecs, SessionEffect, SessionPhase, SessionSnapshot, SpeechRate,
};
