mod common;

use common::{audio_stream, subtitle_stream, video_stream};
use hbc_engine::analyze::{analyze_streams, usable_frame_rate, VideoTrack};
use hbc_engine::context::{DecisionLog, LogLevel};
use hbc_engine::error::StreamFieldError;
use hbc_engine::media::Stream;
use serde_json::json;

fn analyze(streams: &[Stream]) -> (hbc_engine::analyze::StreamAnalysis, DecisionLog) {
    let mut log = DecisionLog::new();
    let analysis = analyze_streams(streams, &mut log);
    (analysis, log)
}

#[test]
fn test_empty_stream_list() {
    let (analysis, log) = analyze(&[]);
    assert!(!analysis.has_subtitles);
    assert_eq!(analysis.audio_track_count, 0);
    assert!(!analysis.audio_bitrate_found());
    assert!(analysis.video.is_none());
    assert!(log.is_empty());
}

#[test]
fn test_typical_movie() {
    let (analysis, _) = analyze(&[
        video_stream(1920, 1080, "24000/1001"),
        audio_stream(Some(640_000)),
        subtitle_stream(),
        subtitle_stream(),
    ]);
    assert!(analysis.has_subtitles);
    assert_eq!(analysis.audio_track_count, 1);
    assert_eq!(analysis.max_audio_bitrate_bps, Some(640_000.0));
    let video = analysis.video.unwrap();
    assert_eq!((video.width, video.height), (1920, 1080));
    assert!((video.frame_rate - 23.976).abs() < 0.001);
}

#[test]
fn test_cover_art_is_not_the_video() {
    let (analysis, log) = analyze(&[
        video_stream(1280, 720, "25/1"),
        video_stream(600, 600, "0/0"),
    ]);
    assert_eq!(
        analysis.video,
        Some(VideoTrack {
            width: 1280,
            height: 720,
            frame_rate: 25.0
        })
    );
    // cover art is reported, but not as a warning
    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.entries()[0].level, LogLevel::Info);
    assert!(log.entries()[0].message.contains("Stream 1"));
}

#[test]
fn test_last_qualifying_video_wins() {
    let (analysis, _) = analyze(&[
        video_stream(1280, 720, "25/1"),
        video_stream(3840, 2160, "60000/1001"),
    ]);
    let video = analysis.video.unwrap();
    assert_eq!((video.width, video.height), (3840, 2160));
}

#[test]
fn test_audio_bitrate_is_running_max() {
    let (analysis, _) = analyze(&[
        audio_stream(Some(96_000)),
        audio_stream(Some(448_000)),
        audio_stream(None),
        audio_stream(Some(192_000)),
    ]);
    assert_eq!(analysis.audio_track_count, 4);
    assert_eq!(analysis.max_audio_bitrate_bps, Some(448_000.0));
}

#[test]
fn test_non_numeric_audio_bitrate_still_counts_track() {
    let stream = Stream {
        bit_rate: Some(json!("N/A")),
        ..audio_stream(None)
    };
    let (analysis, log) = analyze(&[stream]);
    assert_eq!(analysis.audio_track_count, 1);
    assert!(!analysis.audio_bitrate_found());
    assert!(log.is_empty());
}

#[test]
fn test_malformed_stream_does_not_stop_scan() {
    let broken = Stream {
        codec_type: None,
        ..Default::default()
    };
    let bad_width = Stream {
        width: Some(json!("wide")),
        ..video_stream(0, 0, "30/1")
    };
    let (analysis, log) = analyze(&[
        broken,
        bad_width,
        audio_stream(Some(128_000)),
        video_stream(1280, 536, "24/1"),
        subtitle_stream(),
    ]);

    assert!(analysis.has_subtitles);
    assert_eq!(analysis.audio_track_count, 1);
    assert_eq!(analysis.video.unwrap().width, 1280);

    let warnings: Vec<_> = log.warnings().collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].message.contains("stream 0"));
    assert!(warnings[1].message.contains("stream 1"));
    assert!(warnings[1].message.contains("width"));
}

#[test]
fn test_uppercase_codec_type() {
    let stream = Stream {
        codec_type: Some(json!("SUBTITLE")),
        ..Default::default()
    };
    let (analysis, _) = analyze(&[stream]);
    assert!(analysis.has_subtitles);
}

#[test]
fn test_string_dimensions_accepted() {
    let stream = Stream {
        width: Some(json!("1920")),
        height: Some(json!("800")),
        ..video_stream(0, 0, "24/1")
    };
    let (analysis, _) = analyze(&[stream]);
    let video = analysis.video.unwrap();
    assert_eq!((video.width, video.height), (1920, 800));
}

#[test]
fn test_usable_frame_rate_errors() {
    assert_eq!(usable_frame_rate(None), Err(StreamFieldError::MissingFrameRate));
    assert_eq!(
        usable_frame_rate(Some(&json!("fast"))),
        Err(StreamFieldError::MalformedFrameRate("fast".to_string()))
    );
    assert_eq!(
        usable_frame_rate(Some(&json!("0/0"))),
        Err(StreamFieldError::UnusableFrameRate("0/0".to_string()))
    );
    assert_eq!(
        usable_frame_rate(Some(&json!("30/0"))),
        Err(StreamFieldError::UnusableFrameRate("30/0".to_string()))
    );
    assert_eq!(
        usable_frame_rate(Some(&json!("-25/1"))),
        Err(StreamFieldError::UnusableFrameRate("-25/1".to_string()))
    );
    assert_eq!(usable_frame_rate(Some(&json!(50))), Ok(50.0));
}
