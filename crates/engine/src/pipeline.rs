use crate::analyze::analyze_streams;
use crate::classify::{classify_medium, Medium};
use crate::config::{normalize_config, RawConfig};
use crate::context::{Decision, DecisionContext, NoopObserver, Stage, StageObserver};
use crate::encode::{build_command, join_args, plan_audio, AudioPlan};
use crate::geometry::resolve_geometry;
use crate::idempotency::{check_already_compressed, IdempotencyVerdict};
use crate::media::MediaFile;
use crate::result::PluginResult;
use tracing::{debug, info};

/// Decide whether `file` needs transcoding and, if so, build the command.
pub fn decide(file: &MediaFile, raw: &RawConfig) -> PluginResult {
    decide_with_observer(file, raw, &mut NoopObserver)
}

/// [`decide`] with a hook that sees the context before every stage.
pub fn decide_with_observer(
    file: &MediaFile,
    raw: &RawConfig,
    observer: &mut dyn StageObserver,
) -> PluginResult {
    let ctx = run_pipeline(file, raw, observer);
    finish(ctx)
}

/// Run the stages and return the final context.
pub fn run_pipeline(
    file: &MediaFile,
    raw: &RawConfig,
    observer: &mut dyn StageObserver,
) -> DecisionContext {
    let mut ctx = DecisionContext::new();

    observer.before_stage(Stage::NormalizeConfig, &ctx);
    let (config, warnings) = normalize_config(raw);
    ctx.config = config;
    ctx.log.extend(warnings);

    observer.before_stage(Stage::CheckIdempotency, &ctx);
    if check_already_compressed(file, &ctx.config, &mut ctx.log)
        == IdempotencyVerdict::AlreadyCompressed
    {
        info!(container = %file.container, "already compressed, skipping");
        ctx.decision = Some(Decision::AlreadyCompressed);
        return ctx;
    }

    observer.before_stage(Stage::ClassifyMedium, &ctx);
    if let Medium::Other(medium) = classify_medium(file, &mut ctx.log) {
        info!(%medium, "not a video file, skipping");
        ctx.decision = Some(Decision::NotVideo);
        return ctx;
    }

    observer.before_stage(Stage::AnalyzeStreams, &ctx);
    ctx.analysis = analyze_streams(file.streams(), &mut ctx.log);

    observer.before_stage(Stage::ResolveGeometry, &ctx);
    ctx.geometry = resolve_geometry(ctx.analysis.video.as_ref(), ctx.config.max_video_width);
    if ctx.analysis.video.is_none() {
        ctx.log
            .warn("No video stream with a usable frame rate, dimensions left at 0x0");
    } else if ctx.geometry.output_width != ctx.geometry.source_width {
        ctx.log.info(format!(
            "Resize video from {}x{} to {}x{}",
            ctx.geometry.source_width,
            ctx.geometry.source_height,
            ctx.geometry.output_width,
            ctx.geometry.output_height
        ));
    }

    observer.before_stage(Stage::SynthesizeCommand, &ctx);
    ctx.command = build_command(&ctx.config, &ctx.analysis, &ctx.geometry);
    let line = summary(&ctx);
    ctx.log.info(line);
    debug!(command = %join_args(&ctx.command), "built HandBrake command");
    ctx.decision = Some(Decision::Process);

    ctx
}

fn summary(ctx: &DecisionContext) -> String {
    let rate = if ctx.config.use_crf {
        format!("CRF {}", ctx.config.crf_quality)
    } else {
        format!("{} kbps two-pass", ctx.config.video_bitrate_kbps)
    };
    let audio = match plan_audio(&ctx.analysis, &ctx.config) {
        AudioPlan::CopyAll => "audio copied".to_string(),
        AudioPlan::StereoAac { bitrate_kbps: None } => "audio to stereo AAC".to_string(),
        AudioPlan::StereoAac {
            bitrate_kbps: Some(kbps),
        } => format!("audio to stereo AAC {} kbps", kbps),
    };
    format!("Compress video to x264 mp4 ({}, {})", rate, audio)
}

/// Flatten the context into the orchestrator result.
pub fn finish(ctx: DecisionContext) -> PluginResult {
    let mut result = PluginResult {
        log: ctx.log.render(),
        ..PluginResult::default()
    };

    if ctx.decision == Some(Decision::Process) {
        result.should_process = true;
        result.handbrake_mode = true;
        result.command_args = join_args(&ctx.command);
    }

    result
}
