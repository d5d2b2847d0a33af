//! Voice Query Handlers

use std::sync::Arc;

use crate::application::queries::{ListVoices, VoiceListResponse};
use crate::domain::audio::{default_voice, VoiceProfile};

/// ListVoices Handler
pub struct ListVoicesHandler {
    voices: Arc<Vec<VoiceProfile>>,
}

impl ListVoicesHandler {
    pub fn new(voices: Arc<Vec<VoiceProfile>>) -> Self {
        Self { voices }
    }

    pub fn handle(&self, _query: ListVoices) -> VoiceListResponse {
        VoiceListResponse {
            voices: self.voices.as_ref().clone(),
            default_voice_id: default_voice(&self.voices).map(|v| v.id.clone()),
        }
    }
}
