#![allow(dead_code)]

use hbc_engine::media::Stream;
use serde_json::json;

pub fn video_stream(width: u32, height: u32, avg_frame_rate: &str) -> Stream {
    Stream {
        codec_type: Some(json!("video")),
        width: Some(json!(width)),
        height: Some(json!(height)),
        avg_frame_rate: Some(json!(avg_frame_rate)),
        ..Default::default()
    }
}

/// Probe output carries `bit_rate` as a string.
pub fn audio_stream(bit_rate: Option<u64>) -> Stream {
    Stream {
        codec_type: Some(json!("audio")),
        bit_rate: bit_rate.map(|b| json!(b.to_string())),
        ..Default::default()
    }
}

pub fn subtitle_stream() -> Stream {
    Stream {
        codec_type: Some(json!("subtitle")),
        ..Default::default()
    }
}
