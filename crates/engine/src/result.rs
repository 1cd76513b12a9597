use crate::encode::common::OUTPUT_CONTAINER;
use serde::{Deserialize, Serialize};

/// What the orchestrator receives for one file.
///
/// Serialized with the orchestrator's own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResult {
    #[serde(rename = "processFile")]
    pub should_process: bool,
    /// Whitespace-separated HandBrakeCLI arguments; empty when skipped.
    #[serde(rename = "preset")]
    pub command_args: String,
    #[serde(rename = "container")]
    pub output_container: String,
    #[serde(rename = "handBrakeMode")]
    pub handbrake_mode: bool,
    #[serde(rename = "FFmpegMode")]
    pub ffmpeg_mode: bool,
    #[serde(rename = "reQueueAfter")]
    pub requeue_after: bool,
    #[serde(rename = "infoLog")]
    pub log: String,
}

impl Default for PluginResult {
    fn default() -> Self {
        Self {
            should_process: false,
            command_args: String::new(),
            output_container: OUTPUT_CONTAINER.to_string(),
            handbrake_mode: false,
            ffmpeg_mode: false,
            requeue_after: false,
            log: String::new(),
        }
    }
}
