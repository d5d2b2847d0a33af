//! Dictation Commands - 听写会话相关命令

use crate::application::engine::ControlAction;
use crate::domain::session::SessionSnapshot;
use crate::domain::words::GradeLevel;

/// 选词方式
#[derive(Debug, Clone, PartialEq)]
pub enum WordSelection {
    /// 从年级词库随机抽取
    Random { count: usize },
    /// 调用方给定的单词，按顺序或洗牌
    Custom { words: Vec<String>, shuffle: bool },
    /// 使用已保存的单词表（年级取自单词表）
    SavedList { name: String, shuffle: bool },
}

/// 开始听写命令
///
/// `session_id` 为空时创建新会话，否则在已有会话上重新开始
#[derive(Debug, Clone)]
pub struct StartDictation {
    pub session_id: Option<String>,
    pub grade: GradeLevel,
    pub selection: WordSelection,
    pub interval_secs: Option<u32>,
    pub speed: Option<f32>,
    pub voice_id: Option<String>,
    pub pre_rendered: Option<bool>,
}

/// 控制命令 - 暂停/继续、上一个、下一个、重复
#[derive(Debug, Clone)]
pub struct ControlDictation {
    pub session_id: String,
    pub action: ControlAction,
}

/// 停止听写命令
#[derive(Debug, Clone)]
pub struct StopDictation {
    pub session_id: String,
}

/// 听写命令的统一响应
#[derive(Debug, Clone)]
pub struct DictationResponse {
    pub session_id: String,
    pub snapshot: SessionSnapshot,
}

/// 未在命令中指定时使用的默认值
#[derive(Debug, Clone, PartialEq)]
pub struct DictationDefaults {
    pub interval_secs: u32,
    pub speed: f32,
    pub pre_rendered: bool,
}

impl Default for DictationDefaults {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            speed: 1.0,
            pre_rendered: true,
        }
    }
}
