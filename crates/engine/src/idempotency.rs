use crate::config::EncodingConfig;
use crate::context::DecisionLog;
use crate::media::{FileMeta, MediaFile};
use crate::rational::{value_as_f64, value_text};
use serde_json::Value;
use tracing::debug;

/// Container produced by this pipeline.
pub const COMPRESSED_CONTAINER: &str = "mp4";

/// Lowercase substring of the encoder tag written by this pipeline's encoder.
pub const ENCODER_SIGNATURE: &str = "handbrake";

/// Headroom above the target bitrate still counted as "already at target".
pub const VBR_TOLERANCE_KBPS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BitrateSignal {
    /// No comparable bitrate; the file cannot be judged already compressed.
    Absent,
    /// A measured average bitrate at or near the configured target.
    Measured { kbps: f64 },
    /// Constant-quality output is not comparable by bitrate, so only the
    /// container and encoder tag decide.
    ConstantQuality,
}

impl BitrateSignal {
    pub fn is_present(&self) -> bool {
        !matches!(self, BitrateSignal::Absent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdempotencyVerdict {
    AlreadyCompressed,
    NotCompressed,
}

/// First present bitrate tag, checked in priority order.
pub fn find_bitrate_tag(meta: &FileMeta) -> Option<(&'static str, &Value)> {
    [
        ("AvgBitrate", meta.avg_bitrate.as_ref()),
        ("AverageBitrate", meta.average_bitrate.as_ref()),
        ("MaxBitrate", meta.max_bitrate.as_ref()),
    ]
    .into_iter()
    .find_map(|(name, value)| value.filter(|v| !v.is_null()).map(|v| (name, v)))
}

/// Resolve the bitrate signal used by the skip check.
pub fn resolve_bitrate_signal(
    meta: &FileMeta,
    config: &EncodingConfig,
    log: &mut DecisionLog,
) -> BitrateSignal {
    let tag = find_bitrate_tag(meta);
    match tag {
        Some((name, value)) => {
            log.info(format!("Average bitrate taken from {}", name));
            log.info(format!(
                "Current average bitrate {}",
                value_text(value).unwrap_or_default()
            ));
        }
        None => log.fail("Unable to find average bitrate information"),
    }

    if config.use_crf {
        log.info("Compressed using CRF, bitrate is not compared");
        return BitrateSignal::ConstantQuality;
    }

    let Some((name, value)) = tag else {
        return BitrateSignal::Absent;
    };

    let Some(bps) = value_as_f64(value).filter(|b| b.is_finite()) else {
        log.fail(format!(
            "{} value {} is not a number",
            name,
            value_text(value).unwrap_or_default()
        ));
        return BitrateSignal::Absent;
    };

    let kbps = bps / 1000.0;
    let ceiling = config.video_bitrate_kbps as f64 + VBR_TOLERANCE_KBPS;
    if kbps < ceiling {
        log.success(format!(
            "Current video bitrate {} kbps already below {} kbps",
            kbps, config.video_bitrate_kbps
        ));
        BitrateSignal::Measured { kbps }
    } else {
        log.warn(format!(
            "Current video bitrate {} kbps is more than {} kbps",
            kbps, config.video_bitrate_kbps
        ));
        BitrateSignal::Absent
    }
}

/// Decide whether this file already went through this pipeline.
///
/// A file counts as done when it is an mp4, has a comparable bitrate signal,
/// and its encoder tag names HandBrake.
pub fn check_already_compressed(
    file: &MediaFile,
    config: &EncodingConfig,
    log: &mut DecisionLog,
) -> IdempotencyVerdict {
    let signal = resolve_bitrate_signal(&file.meta, config, log);
    let encoder = file.meta.encoder_tag();

    log.info(format!("Current container is {}", file.container));
    if let BitrateSignal::Measured { kbps } = signal {
        log.info(format!("Current average bitrate is {} kbps", kbps));
    }
    log.info(format!(
        "Current encoder is {}",
        encoder.as_deref().unwrap_or("unknown")
    ));

    debug!(container = %file.container, ?signal, ?encoder, "idempotency inputs");

    if file.container != COMPRESSED_CONTAINER || !signal.is_present() {
        log.fail("Not yet compressed");
        return IdempotencyVerdict::NotCompressed;
    }

    match encoder {
        Some(tag) if tag.to_lowercase().contains(ENCODER_SIGNATURE) => {
            log.success("Already compressed, skip");
            IdempotencyVerdict::AlreadyCompressed
        }
        Some(_) => {
            log.fail("Not yet compressed using HandBrake");
            IdempotencyVerdict::NotCompressed
        }
        None => {
            log.fail("Not yet compressed");
            IdempotencyVerdict::NotCompressed
        }
    }
}
