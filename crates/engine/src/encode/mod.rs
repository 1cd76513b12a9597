pub mod common;

use crate::analyze::StreamAnalysis;
use crate::config::EncodingConfig;
use crate::geometry::Geometry;
use common::{
    dimension_flags, encoder_options_value, output_flags, preset_flags, quoted, AUDIO_ENCODER,
    AUDIO_MIXDOWN, VIDEO_ENCODER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPlan {
    /// Pass every audio track through untouched.
    CopyAll,
    /// Re-encode to stereo AAC, with an explicit bitrate cap when the source
    /// is above the configured target.
    StereoAac { bitrate_kbps: Option<u32> },
}

/// Choose how audio is handled.
///
/// Multiple tracks are always copied. A single track is re-encoded only when
/// its bitrate is known; with no tracks or no known bitrate, audio is copied.
pub fn plan_audio(analysis: &StreamAnalysis, config: &EncodingConfig) -> AudioPlan {
    if analysis.audio_track_count > 1 {
        return AudioPlan::CopyAll;
    }
    match analysis.max_audio_bitrate_bps {
        Some(bps) => {
            let target_bps = config.audio_bitrate_kbps as f64 * 1000.0;
            AudioPlan::StereoAac {
                bitrate_kbps: (bps > target_bps).then_some(config.audio_bitrate_kbps),
            }
        }
        None => AudioPlan::CopyAll,
    }
}

fn video_flags(config: &EncodingConfig, geometry: &Geometry) -> Vec<String> {
    let mut flags = vec![
        "--encoder".to_string(),
        quoted(VIDEO_ENCODER),
        "--encoder-preset".to_string(),
        quoted(config.encoder_preset.as_str()),
        "--encoder-tune".to_string(),
        quoted(config.encoder_tune.as_str()),
        "--encopts".to_string(),
        quoted(encoder_options_value(geometry)),
        "--encoder-level".to_string(),
        quoted(config.encoder_level.as_str()),
        "--encoder-profile".to_string(),
        quoted(config.encoder_profile.as_str()),
    ];

    if config.use_crf {
        flags.push("--quality".to_string());
        flags.push(config.crf_quality.to_string());
    } else {
        flags.push("--vb".to_string());
        flags.push(config.video_bitrate_kbps.to_string());
        flags.push("--two-pass".to_string());
    }

    flags.push("--vfr".to_string());
    flags
}

fn audio_flags(plan: AudioPlan) -> Vec<String> {
    let mut flags = vec!["--all-audio".to_string()];
    if let AudioPlan::StereoAac { bitrate_kbps } = plan {
        flags.push("--aencoder".to_string());
        flags.push(quoted(AUDIO_ENCODER));
        flags.push("--mixdown".to_string());
        flags.push(quoted(AUDIO_MIXDOWN));
        if let Some(kbps) = bitrate_kbps {
            flags.push("--ab".to_string());
            flags.push(kbps.to_string());
        }
    }
    flags
}

/// Build the HandBrakeCLI argument list.
///
/// Order is fixed: preset, video encoder settings and rate control,
/// subtitles, audio, dimensions, output options.
pub fn build_command(
    config: &EncodingConfig,
    analysis: &StreamAnalysis,
    geometry: &Geometry,
) -> Vec<String> {
    let mut command = preset_flags();
    command.extend(video_flags(config, geometry));

    if analysis.has_subtitles && config.extract_subs {
        command.push("--all-subtitles".to_string());
    }

    command.extend(audio_flags(plan_audio(analysis, config)));

    // With auto-crop on, HandBrake's own crop detection decides the frame
    if !config.auto_crop {
        command.extend(dimension_flags(geometry));
    }

    command.extend(output_flags());
    command
}

/// Join arguments into the single string the orchestrator passes on.
pub fn join_args(args: &[String]) -> String {
    args.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_audio(bps: f64) -> StreamAnalysis {
        StreamAnalysis {
            audio_track_count: 1,
            max_audio_bitrate_bps: Some(bps),
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_audio_at_target_is_not_capped() {
        // exactly 160 kbps is not above the target
        let plan = plan_audio(&one_audio(160_000.0), &EncodingConfig::default());
        assert_eq!(plan, AudioPlan::StereoAac { bitrate_kbps: None });
    }

    #[test]
    fn test_plan_audio_zero_tracks_copies() {
        let plan = plan_audio(&StreamAnalysis::default(), &EncodingConfig::default());
        assert_eq!(plan, AudioPlan::CopyAll);
    }

    #[test]
    fn test_default_command_text() {
        let analysis = StreamAnalysis {
            has_subtitles: true,
            ..one_audio(256_000.0)
        };
        let geometry = Geometry {
            source_width: 3840,
            source_height: 2160,
            output_width: 1920,
            output_height: 1080,
            key_interval: 11,
            min_key_interval: 5,
            ..Default::default()
        };
        let args = build_command(&EncodingConfig::default(), &analysis, &geometry);
        assert_eq!(
            join_args(&args),
            "-Z \"Creator 1080p60\" --encoder \"x264\" --encoder-preset \"medium\" \
             --encoder-tune \"film\" \
             --encopts \"keyint=11:min-keyint=5:ref=4:bframes=2:b-pyramid=none\" \
             --encoder-level \"4.2\" --encoder-profile \"high\" --quality 23 --vfr \
             --all-subtitles --all-audio --aencoder \"av_aac\" --mixdown \"stereo\" --ab 160 \
             --width 1920 --height 1080 --crop 0:0:0:0 \
             --no-markers --optimize --format \"av_mp4\""
        );
    }
}
