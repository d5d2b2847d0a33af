//! Symphonia Probe - 探测格式并解码首个数据包
//!
//! 实现 AudioProbePort trait

use std::io::Cursor;

use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioProbePort, ClipInfo, ProbeError};

/// 基于 symphonia 的音频探测器
///
/// 能解码出第一个数据包才认为音频可用
#[derive(Debug, Clone, Default)]
pub struct SymphoniaProbe;

impl SymphoniaProbe {
    pub fn new() -> Self {
        Self
    }
}

impl AudioProbePort for SymphoniaProbe {
    fn probe(&self, data: &[u8], extension: Option<&str>) -> Result<ClipInfo, ProbeError> {
        if data.is_empty() {
            return Err(ProbeError::Empty);
        }

        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| ProbeError::Unsupported(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| ProbeError::Decode("No audio track found".to_string()))?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        let codecs = symphonia::default::get_codecs();
        let codec = codecs
            .get_codec(params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut decoder = codecs
            .make(&params, &DecoderOptions::default())
            .map_err(|e| ProbeError::Decode(format!("Decoder creation failed: {}", e)))?;

        loop {
            let packet = format
                .next_packet()
                .map_err(|e| ProbeError::Decode(format!("Packet read error: {}", e)))?;
            if packet.track_id() != track_id {
                continue;
            }
            decoder
                .decode(&packet)
                .map_err(|e| ProbeError::Decode(e.to_string()))?;
            break;
        }

        let duration_ms = match (params.n_frames, params.sample_rate) {
            (Some(frames), Some(rate)) if rate > 0 => Some(frames * 1000 / rate as u64),
            _ => None,
        };

        Ok(ClipInfo {
            codec,
            sample_rate: params.sample_rate,
            channels: params.channels.map(|c| c.count()),
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::tts::silent_wav;

    #[test]
    fn test_probe_wav() {
        let wav = silent_wav(16000, 1000);
        let info = SymphoniaProbe::new().probe(&wav, Some("wav")).unwrap();

        assert_eq!(info.codec, "pcm_s16le");
        assert_eq!(info.sample_rate, Some(16000));
        assert_eq!(info.channels, Some(1));
        assert_eq!(info.duration_ms, Some(1000));
    }

    #[test]
    fn test_probe_without_hint() {
        let wav = silent_wav(22050, 500);
        let info = SymphoniaProbe::new().probe(&wav, None).unwrap();
        assert_eq!(info.sample_rate, Some(22050));
    }

    #[test]
    fn test_probe_rejects_garbage() {
        let probe = SymphoniaProbe::new();
        assert!(matches!(probe.probe(&[], Some("mp3")), Err(ProbeError::Empty)));
        assert!(probe.probe(b"definitely not audio", Some("wav")).is_err());
    }
}
