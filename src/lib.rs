//! Spelldict - 单词听写训练服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Words Context: 年级、选词、已保存单词表
//! - Session Context: 听写会话状态机
//! - Audio Context: 预录音频路径、音色选择
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ClipStore, AudioCache, AudioOutput, SpeechEngine, Repositories）
//! - Speech: 预录音频 → 合成语音的回退链
//! - Engine: 每个会话一个 actor 的听写引擎
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: SessionManager, AudioCache 内存实现
//! - Worker: SessionReaper 空闲会话回收
//! - Persistence: Sled 单词表存储
//! - Adapters: ClipStore, Probe, TTS Client, Speech Engines, Word Pool
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
