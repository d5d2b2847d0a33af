//! Clip Store Adapters - 预录音频资源存储实现

mod file_clip_store;
mod http_clip_store;

pub use file_clip_store::FileClipStore;
pub use http_clip_store::{HttpClipStore, HttpClipStoreConfig};
