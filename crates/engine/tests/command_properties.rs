use hbc_engine::analyze::StreamAnalysis;
use hbc_engine::config::{normalize_config, EncodingConfig, RawConfig};
use hbc_engine::encode::{build_command, join_args, plan_audio, AudioPlan};
use hbc_engine::geometry::Geometry;
use proptest::prelude::*;
use serde_json::json;

fn geometry_1080p() -> Geometry {
    Geometry {
        source_width: 1920,
        source_height: 1080,
        output_width: 1920,
        output_height: 1080,
        key_interval: 12,
        min_key_interval: 6,
        ..Default::default()
    }
}

fn audio(tracks: usize, max_bps: Option<f64>) -> StreamAnalysis {
    StreamAnalysis {
        audio_track_count: tracks,
        max_audio_bitrate_bps: max_bps,
        ..Default::default()
    }
}

fn command_for(config: &EncodingConfig, analysis: &StreamAnalysis) -> String {
    join_args(&build_command(config, analysis, &geometry_1080p()))
}

#[test]
fn test_two_audio_tracks_are_copied() {
    let cmd = command_for(
        &EncodingConfig::default(),
        &audio(2, Some(640_000.0)),
    );
    assert!(cmd.contains("--all-audio"));
    assert!(!cmd.contains("--aencoder"));
    assert!(!cmd.contains("--mixdown"));
    assert!(!cmd.contains("--ab "));
}

#[test]
fn test_low_bitrate_single_track_is_not_capped() {
    let cmd = command_for(&EncodingConfig::default(), &audio(1, Some(128_000.0)));
    assert!(cmd.contains("--all-audio --aencoder \"av_aac\" --mixdown \"stereo\""));
    assert!(!cmd.contains("--ab "));
}

#[test]
fn test_high_bitrate_single_track_is_capped() {
    let cmd = command_for(&EncodingConfig::default(), &audio(1, Some(256_000.0)));
    assert!(cmd.contains("--mixdown \"stereo\" --ab 160 "));
}

#[test]
fn test_single_track_without_bitrate_is_copied() {
    let cmd = command_for(&EncodingConfig::default(), &audio(1, None));
    assert!(cmd.contains("--all-audio --width"));
    assert!(!cmd.contains("--aencoder"));
}

/// The cap is added exactly when the source exceeds the configured bitrate.
#[test]
fn property_audio_cap_threshold() {
    proptest!(|(abr in 32u32..=512, source_kbps in 1u32..2000)| {
        let raw: RawConfig = serde_json::from_value(json!({ "audio_bitrate": abr })).unwrap();
        let (config, _) = normalize_config(&raw);
        let plan = plan_audio(&audio(1, Some(source_kbps as f64 * 1000.0)), &config);
        let expected = if source_kbps > abr { Some(abr) } else { None };
        prop_assert_eq!(plan, AudioPlan::StereoAac { bitrate_kbps: expected });
    });
}

#[test]
fn test_vbr_branch() {
    let config = EncodingConfig {
        use_crf: false,
        video_bitrate_kbps: 3200,
        ..Default::default()
    };
    let cmd = command_for(&config, &audio(0, None));
    assert!(cmd.contains("--encoder-profile \"high\" --vb 3200 --two-pass --vfr"));
    assert!(!cmd.contains("--quality"));
}

#[test]
fn test_crf_branch_prints_fractional_quality() {
    let config = EncodingConfig {
        crf_quality: 25.5,
        ..Default::default()
    };
    let cmd = command_for(&config, &audio(0, None));
    assert!(cmd.contains("--quality 25.5 --vfr"));
    assert!(!cmd.contains("--two-pass"));
}

#[test]
fn test_negative_zero_quality_prints_as_zero() {
    let raw: RawConfig = serde_json::from_value(json!({ "crf_quality": "-0" })).unwrap();
    let (config, _) = normalize_config(&raw);
    let cmd = command_for(&config, &audio(0, None));
    assert!(cmd.contains("--quality 0 --vfr"), "{}", cmd);
}

#[test]
fn test_subtitles_need_both_presence_and_option() {
    let with_subs = StreamAnalysis {
        has_subtitles: true,
        ..Default::default()
    };
    let extract = EncodingConfig::default();
    let keep = EncodingConfig {
        extract_subs: false,
        ..Default::default()
    };

    assert!(command_for(&extract, &with_subs).contains("--all-subtitles"));
    assert!(!command_for(&keep, &with_subs).contains("--all-subtitles"));
    assert!(!command_for(&extract, &StreamAnalysis::default()).contains("--all-subtitles"));
}

#[test]
fn test_auto_crop_omits_dimensions() {
    let config = EncodingConfig {
        auto_crop: true,
        ..Default::default()
    };
    let cmd = command_for(&config, &audio(2, None));
    assert!(!cmd.contains("--width"));
    assert!(!cmd.contains("--height"));
    assert!(!cmd.contains("--crop"));
    assert!(cmd.ends_with("--all-audio --no-markers --optimize --format \"av_mp4\""));
}

/// Whatever the options, the fixed policy flags are present and in order.
#[test]
fn property_fixed_flag_order() {
    proptest!(|(
        use_crf in any::<bool>(),
        auto_crop in any::<bool>(),
        has_subtitles in any::<bool>(),
        tracks in 0usize..4,
    )| {
        let config = EncodingConfig { use_crf, auto_crop, ..Default::default() };
        let analysis = StreamAnalysis {
            has_subtitles,
            ..audio(tracks, Some(320_000.0))
        };
        let args = build_command(&config, &analysis, &geometry_1080p());

        prop_assert_eq!(&args[0], "-Z");
        prop_assert_eq!(&args[1], "\"Creator 1080p60\"");
        prop_assert_eq!(&args[2], "--encoder");
        prop_assert_eq!(&args[3], "\"x264\"");

        let pos = |flag: &str| args.iter().position(|a| a == flag);
        let encopts = pos("--encopts").unwrap();
        prop_assert_eq!(
            &args[encopts + 1],
            "\"keyint=12:min-keyint=6:ref=4:bframes=2:b-pyramid=none\""
        );
        let vfr = pos("--vfr").unwrap();
        let all_audio = pos("--all-audio").unwrap();
        prop_assert!(encopts < vfr && vfr < all_audio);
        if let Some(subs) = pos("--all-subtitles") {
            prop_assert!(vfr < subs && subs < all_audio);
        }
        if let Some(width) = pos("--width") {
            prop_assert!(all_audio < width);
        }

        let n = args.len();
        prop_assert_eq!(&args[n - 4..], &["--no-markers", "--optimize", "--format", "\"av_mp4\""]);
        prop_assert!(args.iter().all(|a| !a.is_empty()));
    });
}
