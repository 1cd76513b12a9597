//! Single-pass scan over every probe stream.

use crate::context::DecisionLog;
use crate::error::StreamFieldError;
use crate::media::Stream;
use crate::rational::{parse_rational, value_as_dimension, value_as_f64, value_text};
use serde_json::Value;
use tracing::{debug, warn};

/// Dimensions and rate of a stream that qualified as the playback video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoTrack {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamAnalysis {
    pub has_subtitles: bool,
    pub audio_track_count: usize,
    /// Highest numeric audio bitrate seen, in bits per second. `None` when no
    /// audio stream carried a usable bitrate.
    pub max_audio_bitrate_bps: Option<f64>,
    /// Last stream with a positive finite frame rate.
    pub video: Option<VideoTrack>,
}

impl StreamAnalysis {
    pub fn audio_bitrate_found(&self) -> bool {
        self.max_audio_bitrate_bps.is_some()
    }

    fn record_audio(&mut self, stream: &Stream) {
        self.audio_track_count += 1;
        let bitrate = stream
            .bit_rate
            .as_ref()
            .and_then(value_as_f64)
            .filter(|b| b.is_finite());
        if let Some(bps) = bitrate {
            let max = self.max_audio_bitrate_bps.map_or(bps, |m| m.max(bps));
            self.max_audio_bitrate_bps = Some(max);
        }
    }
}

/// Frame rate of a video stream, if it describes real playback.
///
/// Cover art and other still images show up as video streams with a
/// `0/0` rate, so anything non-finite or not positive is rejected.
pub fn usable_frame_rate(value: Option<&Value>) -> Result<f64, StreamFieldError> {
    let value = value.ok_or(StreamFieldError::MissingFrameRate)?;
    let text = value_text(value).ok_or(StreamFieldError::MissingFrameRate)?;
    let rate =
        parse_rational(&text).ok_or_else(|| StreamFieldError::MalformedFrameRate(text.to_string()))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(StreamFieldError::UnusableFrameRate(text.to_string()))
    }
}

fn dimension(value: Option<&Value>, field: &'static str) -> Result<u32, StreamFieldError> {
    value
        .and_then(value_as_dimension)
        .ok_or_else(|| StreamFieldError::InvalidDimension {
            field,
            value: value
                .and_then(value_text)
                .map(|t| t.into_owned())
                .unwrap_or_else(|| "missing".to_string()),
        })
}

fn video_track(stream: &Stream) -> Result<VideoTrack, StreamFieldError> {
    let frame_rate = usable_frame_rate(stream.avg_frame_rate.as_ref())?;
    let width = dimension(stream.width.as_ref(), "width")?;
    let height = dimension(stream.height.as_ref(), "height")?;
    Ok(VideoTrack {
        width,
        height,
        frame_rate,
    })
}

fn inspect_stream(stream: &Stream, analysis: &mut StreamAnalysis) -> Result<(), StreamFieldError> {
    let codec_type = stream.codec_type().ok_or(StreamFieldError::MissingCodecType)?;
    match codec_type.as_str() {
        "subtitle" => analysis.has_subtitles = true,
        "audio" => analysis.record_audio(stream),
        "video" => analysis.video = Some(video_track(stream)?),
        _ => {}
    }
    Ok(())
}

/// Scan all streams once. A fault in one stream is logged against its index
/// and never stops the rest of the scan.
pub fn analyze_streams(streams: &[Stream], log: &mut DecisionLog) -> StreamAnalysis {
    let mut analysis = StreamAnalysis::default();

    for (index, stream) in streams.iter().enumerate() {
        match inspect_stream(stream, &mut analysis) {
            Ok(()) => {}
            Err(e) if e.is_frame_rate() => {
                debug!(index, error = %e, "video stream ignored for geometry");
                log.info(format!("Stream {} ignored for geometry: {}", index, e));
            }
            Err(e) => {
                warn!(index, error = %e, "failed to read stream");
                log.warn(format!("Error during probing stream {}: {}", index, e));
            }
        }
    }

    if let Some(video) = &analysis.video {
        debug!(
            width = video.width,
            height = video.height,
            frame_rate = video.frame_rate,
            "selected video stream"
        );
    }

    analysis
}
