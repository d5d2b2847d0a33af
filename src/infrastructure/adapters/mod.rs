//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod probe;
pub mod speech;
pub mod storage;
pub mod tts;
pub mod word_pool;

pub use probe::*;
pub use speech::*;
pub use storage::*;
pub use tts::*;
pub use word_pool::StaticWordPool;
