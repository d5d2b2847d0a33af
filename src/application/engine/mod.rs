//! 会话引擎 - 每个听写会话一个 actor 任务
//!
//! 包含：
//! - scheduler: 每秒节拍与半程回调
//! - driver: 持有状态机的 actor，串行处理命令与计时事件
//! - handle: 对外的可克隆句柄

mod driver;
mod handle;
mod scheduler;

pub use driver::{ControlAction, SessionSettings};
pub use handle::{DictationEngine, EngineError, SessionHandle};
pub use scheduler::{CadenceScheduler, HalfwayTimer, TimerEvent};
