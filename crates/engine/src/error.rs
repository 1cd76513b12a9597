use thiserror::Error;

/// A single probe stream field that could not be read.
///
/// These never abort a decision: the analyzer logs them against the stream
/// index and moves on to the next stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamFieldError {
    #[error("stream has no readable codec_type")]
    MissingCodecType,

    #[error("video stream has no avg_frame_rate")]
    MissingFrameRate,

    #[error("avg_frame_rate {0:?} is not a number or rational")]
    MalformedFrameRate(String),

    #[error("avg_frame_rate {0:?} is not a positive finite rate")]
    UnusableFrameRate(String),

    #[error("{field} {value:?} is not a valid dimension")]
    InvalidDimension { field: &'static str, value: String },
}

impl StreamFieldError {
    /// Frame-rate problems are expected on cover art and similar still
    /// "video" streams, so they are reported less loudly than other faults.
    pub fn is_frame_rate(&self) -> bool {
        matches!(
            self,
            Self::MissingFrameRate | Self::MalformedFrameRate(_) | Self::UnusableFrameRate(_)
        )
    }
}

/// A string that does not name a member of one of the encoder enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {option}")]
pub struct InvalidOption {
    pub option: &'static str,
    pub value: String,
}
