use crate::context::DecisionLog;
use crate::media::MediaFile;
use tracing::debug;

/// The only medium this pipeline transcodes.
pub const VIDEO_MEDIUM: &str = "video";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Medium {
    Video,
    Other(String),
}

/// Classify a file by the orchestrator's medium tag.
///
/// Stream contents are not consulted: a file tagged as video with no usable
/// video stream still classifies as [`Medium::Video`].
pub fn classify_medium(file: &MediaFile, log: &mut DecisionLog) -> Medium {
    if file.file_medium == VIDEO_MEDIUM {
        Medium::Video
    } else {
        debug!(medium = %file.file_medium, "file is not video");
        log.fail("File is not video");
        Medium::Other(file.file_medium.clone())
    }
}
