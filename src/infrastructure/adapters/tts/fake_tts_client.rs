//! Fake TTS Client - 用于测试和离线运行的 TTS 客户端
//!
//! 不调用 TTS 服务，按文本长度生成静音 WAV

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 采样率
    pub sample_rate: u32,
    /// 每个字符的时长（毫秒）
    pub ms_per_char: u64,
    /// 模拟合成延迟
    pub latency: Duration,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            ms_per_char: 80,
            latency: Duration::from_millis(200),
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            latency_ms = config.latency.as_millis() as u64,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = ?request.voice_id,
            speed = request.speed,
            "FakeTtsClient: returning silent audio"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let chars = request.text.chars().count().max(1) as u64;
        let speed = if request.speed > 0.0 { request.speed } else { 1.0 };
        let duration_ms = ((chars * self.config.ms_per_char) as f32 / speed) as u64;

        Ok(SynthesisResponse {
            audio_data: silent_wav(self.config.sample_rate, duration_ms),
            duration_ms: Some(duration_ms),
            sample_rate: Some(self.config.sample_rate),
        })
    }
}

/// 生成单声道 16 位静音 WAV
pub fn silent_wav(sample_rate: u32, duration_ms: u64) -> Vec<u8> {
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let num_samples = (sample_rate as u64 * duration_ms / 1000) as usize;

    let data_size = num_samples * (bits_per_sample as usize / 8) * num_channels as usize;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&num_channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = num_channels * (bits_per_sample / 8);
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());
    wav.resize(44 + data_size, 0);

    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_wav_layout() {
        let wav = silent_wav(16000, 500);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 16000);
    }

    #[tokio::test]
    async fn test_fake_synthesis_scales_with_speed() {
        let client = FakeTtsClient::new(FakeTtsClientConfig {
            latency: Duration::ZERO,
            ..Default::default()
        });

        let normal = client
            .synthesize(SynthesisRequest {
                text: "cat".into(),
                voice_id: None,
                speed: 1.0,
            })
            .await
            .unwrap();
        let fast = client
            .synthesize(SynthesisRequest {
                text: "cat".into(),
                voice_id: None,
                speed: 2.0,
            })
            .await
            .unwrap();

        assert_eq!(normal.duration_ms, Some(240));
        assert_eq!(fast.duration_ms, Some(120));
        assert!(fast.audio_data.len() < normal.audio_data.len());
    }
}
