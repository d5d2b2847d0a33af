//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{
    DictationResponse, StartDictation, VoiceListResponse, WordListSummary, WordPoolResponse,
    WordSelection,
};
use crate::domain::audio::VoiceProfile;
use crate::domain::session::SessionSnapshot;
use crate::domain::words::{GradeLevel, SavedWordList};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Session DTOs
// ============================================================================

/// 选词方式，`mode` 字段区分
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionDto {
    Random {
        count: usize,
    },
    Custom {
        words: Vec<String>,
        #[serde(default)]
        shuffle: bool,
    },
    List {
        list_name: String,
        #[serde(default)]
        shuffle: bool,
    },
}

impl From<SelectionDto> for WordSelection {
    fn from(dto: SelectionDto) -> Self {
        match dto {
            SelectionDto::Random { count } => WordSelection::Random { count },
            SelectionDto::Custom { words, shuffle } => WordSelection::Custom { words, shuffle },
            SelectionDto::List { list_name, shuffle } => WordSelection::SavedList {
                name: list_name,
                shuffle,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// 为空时创建新会话
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub grade: GradeLevel,
    #[serde(flatten)]
    pub selection: SelectionDto,
    #[serde(default)]
    pub interval_secs: Option<u32>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub pre_rendered: Option<bool>,
}

impl From<StartSessionRequest> for StartDictation {
    fn from(req: StartSessionRequest) -> Self {
        StartDictation {
            session_id: req.session_id,
            grade: req.grade,
            selection: req.selection.into(),
            interval_secs: req.interval_secs,
            speed: req.speed,
            voice_id: req.voice_id,
            pre_rendered: req.pre_rendered,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SessionIdRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub snapshot: SessionSnapshot,
}

impl From<DictationResponse> for SessionResponse {
    fn from(resp: DictationResponse) -> Self {
        Self {
            session_id: resp.session_id,
            snapshot: resp.snapshot,
        }
    }
}

// ============================================================================
// Word DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WordPoolRequest {
    #[serde(default)]
    pub grade: GradeLevel,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WordPoolResponseDto {
    pub grade: GradeLevel,
    pub words: Vec<String>,
    pub pool_size: usize,
}

impl From<WordPoolResponse> for WordPoolResponseDto {
    fn from(resp: WordPoolResponse) -> Self {
        Self {
            grade: resp.grade,
            words: resp.words,
            pool_size: resp.pool_size,
        }
    }
}

// ============================================================================
// Word List DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SaveListRequest {
    pub name: String,
    pub words: Vec<String>,
    #[serde(default)]
    pub grade: GradeLevel,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListNameRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct WordListResponse {
    pub name: String,
    pub words: Vec<String>,
    pub grade: GradeLevel,
    pub summary: String,
    pub created_at: String,
}

impl From<SavedWordList> for WordListResponse {
    fn from(list: SavedWordList) -> Self {
        Self {
            name: list.name().to_string(),
            summary: list.summary(),
            grade: list.grade(),
            created_at: list.created_at().to_rfc3339(),
            words: list.words().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WordListSummaryDto {
    pub name: String,
    pub summary: String,
    pub word_count: usize,
    pub grade: GradeLevel,
    pub created_at: String,
}

impl From<WordListSummary> for WordListSummaryDto {
    fn from(summary: WordListSummary) -> Self {
        Self {
            name: summary.name,
            summary: summary.summary,
            word_count: summary.word_count,
            grade: summary.grade,
            created_at: summary.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceListDto {
    pub voices: Vec<VoiceProfile>,
    pub default_voice_id: Option<String>,
}

impl From<VoiceListResponse> for VoiceListDto {
    fn from(resp: VoiceListResponse) -> Self {
        Self {
            voices: resp.voices,
            default_voice_id: resp.default_voice_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_selection_modes() {
        let req: StartSessionRequest = serde_json::from_value(serde_json::json!({
            "grade": "gr45",
            "mode": "custom",
            "words": ["cat", "dog"],
            "interval_secs": 5
        }))
        .unwrap();
        let cmd = StartDictation::from(req);
        assert_eq!(cmd.grade, GradeLevel::Gr45);
        assert_eq!(cmd.interval_secs, Some(5));
        assert_eq!(
            cmd.selection,
            WordSelection::Custom {
                words: vec!["cat".into(), "dog".into()],
                shuffle: false
            }
        );

        let req: StartSessionRequest = serde_json::from_value(serde_json::json!({
            "mode": "list",
            "list_name": "week 1",
            "shuffle": true
        }))
        .unwrap();
        assert_eq!(req.grade, GradeLevel::Gr23);
        assert!(matches!(
            WordSelection::from(req.selection),
            WordSelection::SavedList { name, shuffle: true } if name == "week 1"
        ));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: Result<StartSessionRequest, _> =
            serde_json::from_value(serde_json::json!({"mode": "spelling_bee"}));
        assert!(result.is_err());
    }
}
