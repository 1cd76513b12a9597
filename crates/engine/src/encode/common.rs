// Fixed HandBrakeCLI command components

use crate::geometry::Geometry;

/// HandBrake preset the encode starts from; every relevant setting is
/// overridden by the flags that follow it.
pub const TARGET_PRESET: &str = "Creator 1080p60";

/// Software H.264 encoder.
pub const VIDEO_ENCODER: &str = "x264";

pub const AUDIO_ENCODER: &str = "av_aac";
pub const AUDIO_MIXDOWN: &str = "stereo";
pub const OUTPUT_FORMAT: &str = "av_mp4";

/// Extension of the file HandBrake writes.
pub const OUTPUT_CONTAINER: &str = ".mp4";

pub const B_FRAMES: u32 = 2;

/// Wrap a value in double quotes the way HandBrakeCLI arguments are written
/// in an orchestrator preset string.
pub fn quoted(value: impl AsRef<str>) -> String {
    format!("\"{}\"", value.as_ref())
}

/// Returns the `--encopts` value: key-frame spacing, reference depth, and
/// two non-pyramidal B-frames.
pub fn encoder_options_value(geometry: &Geometry) -> String {
    format!(
        "keyint={}:min-keyint={}:ref={}:bframes={}:b-pyramid=none",
        geometry.key_interval, geometry.min_key_interval, geometry.frame_reference, B_FRAMES
    )
}

/// Returns the preset selection flags
pub fn preset_flags() -> Vec<String> {
    vec!["-Z".to_string(), quoted(TARGET_PRESET)]
}

/// Returns explicit dimension flags with cropping disabled
pub fn dimension_flags(geometry: &Geometry) -> Vec<String> {
    vec![
        "--width".to_string(),
        geometry.output_width.to_string(),
        "--height".to_string(),
        geometry.output_height.to_string(),
        "--crop".to_string(),
        "0:0:0:0".to_string(),
    ]
}

/// Returns the web-delivery output flags:
/// - No chapter markers
/// - Optimize for HTTP streaming
/// - MP4 output
pub fn output_flags() -> Vec<String> {
    vec![
        "--no-markers".to_string(),
        "--optimize".to_string(),
        "--format".to_string(),
        quoted(OUTPUT_FORMAT),
    ]
}
