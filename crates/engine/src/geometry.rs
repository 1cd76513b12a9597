use crate::analyze::VideoTrack;

/// x264 `ref` used for every encode.
pub const FRAME_REFERENCE_DEPTH: u32 = 4;

/// Key-frame spacing used when no stream has a usable frame rate
/// (half of an assumed 30 fps, and half of that again).
pub const DEFAULT_KEY_INTERVAL: u32 = 15;
pub const DEFAULT_MIN_KEY_INTERVAL: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub source_width: u32,
    pub source_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub key_interval: u32,
    pub min_key_interval: u32,
    pub frame_reference: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            source_width: 0,
            source_height: 0,
            output_width: 0,
            output_height: 0,
            key_interval: DEFAULT_KEY_INTERVAL,
            min_key_interval: DEFAULT_MIN_KEY_INTERVAL,
            frame_reference: FRAME_REFERENCE_DEPTH,
        }
    }
}

/// Fit `width x height` within `max_width`, keeping the aspect ratio.
/// The scaled height is truncated toward zero.
pub fn scale_to_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scaled = (max_width as f64 / width as f64 * height as f64).floor();
    (max_width, scaled as u32)
}

/// `(keyint, min-keyint)` for a positive frame rate.
pub fn key_intervals(frame_rate: f64) -> (u32, u32) {
    let key_interval = (frame_rate / 2.0).floor() as u32;
    (key_interval, key_interval / 2)
}

/// Output geometry and key-frame timing for the selected video track.
///
/// Without a track the zero dimensions and default intervals are kept and
/// the command is still built from them.
pub fn resolve_geometry(video: Option<&VideoTrack>, max_video_width: u32) -> Geometry {
    let Some(video) = video else {
        return Geometry::default();
    };

    let (output_width, output_height) = scale_to_width(video.width, video.height, max_video_width);
    let (key_interval, min_key_interval) = key_intervals(video.frame_rate);

    Geometry {
        source_width: video.width,
        source_height: video.height,
        output_width,
        output_height,
        key_interval,
        min_key_interval,
        frame_reference: FRAME_REFERENCE_DEPTH,
    }
}
