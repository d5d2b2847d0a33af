//! Voice Queries - 音色目录查询

use crate::domain::audio::VoiceProfile;

/// 列出所有音色查询
#[derive(Debug, Clone)]
pub struct ListVoices;

/// 音色目录响应
#[derive(Debug, Clone)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceProfile>,
    pub default_voice_id: Option<String>,
}
