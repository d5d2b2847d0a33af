//! Audio Context - Voice Catalog

use serde::{Deserialize, Serialize};

/// 合成语音音色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub id: String,
    pub name: String,
    /// BCP 47 语言标签，如 `en-US`
    pub lang: String,
}

impl VoiceProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: lang.into(),
        }
    }

    pub fn is_english(&self) -> bool {
        self.lang.to_lowercase().starts_with("en")
    }
}

const PREFERRED_MARKERS: [&str; 3] = ["Enhanced", "Premium", "Samantha"];

/// 选择默认音色
///
/// 英语音色中取最后一个名字含 Enhanced / Premium / Samantha 的；
/// 没有则取第一个英语音色；没有英语音色则取第一个
pub fn default_voice(voices: &[VoiceProfile]) -> Option<&VoiceProfile> {
    let english: Vec<&VoiceProfile> = voices.iter().filter(|v| v.is_english()).collect();

    english
        .iter()
        .rev()
        .find(|v| PREFERRED_MARKERS.iter().any(|m| v.name.contains(m)))
        .or_else(|| english.first())
        .copied()
        .or_else(|| voices.first())
}

/// 按 id 查找音色，未知 id 回落到默认音色
pub fn find_voice<'a>(voices: &'a [VoiceProfile], id: Option<&str>) -> Option<&'a VoiceProfile> {
    id.and_then(|id| voices.iter().find(|v| v.id == id))
        .or_else(|| default_voice(voices))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<VoiceProfile> {
        vec![
            VoiceProfile::new("fr", "Amelie", "fr-FR"),
            VoiceProfile::new("alex", "Alex", "en-US"),
            VoiceProfile::new("sam", "Samantha", "en-US"),
            VoiceProfile::new("dan", "Daniel (Enhanced)", "en-GB"),
            VoiceProfile::new("fred", "Fred", "en-US"),
        ]
    }

    #[test]
    fn test_default_prefers_last_marked_english_voice() {
        let voices = catalog();
        assert_eq!(default_voice(&voices).unwrap().id, "dan");
    }

    #[test]
    fn test_default_first_english_without_markers() {
        let voices = vec![
            VoiceProfile::new("fr", "Amelie", "fr-FR"),
            VoiceProfile::new("alex", "Alex", "en-US"),
            VoiceProfile::new("fred", "Fred", "en-US"),
        ];
        assert_eq!(default_voice(&voices).unwrap().id, "alex");
    }

    #[test]
    fn test_default_without_english() {
        let voices = vec![
            VoiceProfile::new("fr", "Amelie", "fr-FR"),
            VoiceProfile::new("de", "Anna", "de-DE"),
        ];
        assert_eq!(default_voice(&voices).unwrap().id, "fr");
        assert!(default_voice(&[]).is_none());
    }

    #[test]
    fn test_find_voice_unknown_falls_back() {
        let voices = catalog();
        assert_eq!(find_voice(&voices, Some("alex")).unwrap().id, "alex");
        assert_eq!(find_voice(&voices, Some("nope")).unwrap().id, "dan");
        assert_eq!(find_voice(&voices, None).unwrap().id, "dan");
    }
}
