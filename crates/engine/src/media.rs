use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A file as described by the orchestrator after probing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFile {
    pub container: String,
    #[serde(rename = "fileMedium")]
    pub file_medium: String,
    pub meta: FileMeta,
    #[serde(rename = "ffProbeData")]
    pub ff_probe_data: ProbeData,
}

/// Container-level metadata tags. Bitrates may be numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMeta {
    #[serde(rename = "AvgBitrate", skip_serializing_if = "Option::is_none")]
    pub avg_bitrate: Option<Value>,
    #[serde(rename = "AverageBitrate", skip_serializing_if = "Option::is_none")]
    pub average_bitrate: Option<Value>,
    #[serde(rename = "MaxBitrate", skip_serializing_if = "Option::is_none")]
    pub max_bitrate: Option<Value>,
    #[serde(rename = "Encoder", skip_serializing_if = "Option::is_none")]
    pub encoder: Option<Value>,
}

impl FileMeta {
    /// The encoder tag as text, if the file carries one.
    pub fn encoder_tag(&self) -> Option<String> {
        match self.encoder.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeData {
    pub streams: Vec<Stream>,
}

/// One elementary stream from the probe output.
///
/// Fields are kept as raw JSON so a malformed value in one stream only
/// affects that stream when it is analyzed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_frame_rate: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<Value>,
}

impl Stream {
    /// Lowercased codec type, if it is a string.
    pub fn codec_type(&self) -> Option<String> {
        self.codec_type
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_lowercase)
    }
}

impl MediaFile {
    pub fn streams(&self) -> &[Stream] {
        &self.ff_probe_data.streams
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Read a media descriptor written by the orchestrator.
pub fn load_media_file(path: &Path) -> Result<MediaFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read media descriptor {}", path.display()))?;
    MediaFile::from_json(&contents)
        .with_context(|| format!("Failed to parse media descriptor {}", path.display()))
}
