use crate::context::LogEntry;
use crate::error::InvalidOption;
use crate::rational::{parse_leading_float, parse_leading_int, value_text};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Options exactly as the orchestrator hands them over.
///
/// Every option may be absent, and present values may be strings, numbers or
/// booleans. Nothing is validated here; see [`normalize_config`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub max_video_width: Option<Value>,
    pub auto_crop: Option<Value>,
    pub use_crf: Option<Value>,
    pub crf_quality: Option<Value>,
    pub video_bitrate: Option<Value>,
    pub audio_bitrate: Option<Value>,
    pub extract_subs: Option<Value>,
    pub encoder_preset: Option<Value>,
    pub encoder_tune: Option<Value>,
    pub encoder_level: Option<Value>,
    pub encoder_profile: Option<Value>,
    pub is_debug: Option<Value>,
}

impl RawConfig {
    /// Whether the caller asked for per-stage context dumps.
    ///
    /// Only an explicit `true` (boolean or case-insensitive string) enables it.
    pub fn debug_requested(&self) -> bool {
        self.is_debug
            .as_ref()
            .and_then(|v| value_text(v))
            .map(|t| t.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Validated encoding options. Every field is inside its documented domain.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingConfig {
    pub max_video_width: u32,
    pub auto_crop: bool,
    pub use_crf: bool,
    pub crf_quality: f64,
    pub video_bitrate_kbps: u32,
    pub audio_bitrate_kbps: u32,
    pub extract_subs: bool,
    pub encoder_preset: EncoderPreset,
    pub encoder_tune: EncoderTune,
    pub encoder_level: EncoderLevel,
    pub encoder_profile: EncoderProfile,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            max_video_width: 1920,
            auto_crop: false,
            use_crf: true,
            crf_quality: 23.0,
            video_bitrate_kbps: 2500,
            audio_bitrate_kbps: 160,
            extract_subs: true,
            encoder_preset: EncoderPreset::Medium,
            encoder_tune: EncoderTune::Film,
            encoder_level: EncoderLevel::L4_2,
            encoder_profile: EncoderProfile::High,
        }
    }
}

pub const MIN_VIDEO_BITRATE_KBPS: i64 = 1000;
pub const AUDIO_BITRATE_RANGE_KBPS: std::ops::RangeInclusive<i64> = 32..=512;
pub const CRF_RANGE: std::ops::RangeInclusive<f64> = 0.0..=51.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderPreset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    Medium,
    Slow,
    Slower,
    Veryslow,
    Placebo,
}

impl EncoderPreset {
    pub const ALL: [EncoderPreset; 10] = [
        EncoderPreset::Ultrafast,
        EncoderPreset::Superfast,
        EncoderPreset::Veryfast,
        EncoderPreset::Faster,
        EncoderPreset::Fast,
        EncoderPreset::Medium,
        EncoderPreset::Slow,
        EncoderPreset::Slower,
        EncoderPreset::Veryslow,
        EncoderPreset::Placebo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EncoderPreset::Ultrafast => "ultrafast",
            EncoderPreset::Superfast => "superfast",
            EncoderPreset::Veryfast => "veryfast",
            EncoderPreset::Faster => "faster",
            EncoderPreset::Fast => "fast",
            EncoderPreset::Medium => "medium",
            EncoderPreset::Slow => "slow",
            EncoderPreset::Slower => "slower",
            EncoderPreset::Veryslow => "veryslow",
            EncoderPreset::Placebo => "placebo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderTune {
    Film,
    Animation,
    Grain,
    StillImage,
    Psnr,
    Ssim,
    FastDecode,
    ZeroLatency,
}

impl EncoderTune {
    pub const ALL: [EncoderTune; 8] = [
        EncoderTune::Film,
        EncoderTune::Animation,
        EncoderTune::Grain,
        EncoderTune::StillImage,
        EncoderTune::Psnr,
        EncoderTune::Ssim,
        EncoderTune::FastDecode,
        EncoderTune::ZeroLatency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EncoderTune::Film => "film",
            EncoderTune::Animation => "animation",
            EncoderTune::Grain => "grain",
            EncoderTune::StillImage => "stillimage",
            EncoderTune::Psnr => "psnr",
            EncoderTune::Ssim => "ssim",
            EncoderTune::FastDecode => "fastdecode",
            EncoderTune::ZeroLatency => "zerolatency",
        }
    }
}

/// H.264 level, or `auto` to let the encoder pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderLevel {
    Auto,
    L1_0,
    L1b,
    L1_1,
    L1_2,
    L1_3,
    L2_0,
    L2_1,
    L2_2,
    L3_0,
    L3_1,
    L3_2,
    L4_0,
    L4_1,
    L4_2,
    L5_0,
    L5_1,
    L5_2,
}

impl EncoderLevel {
    pub const ALL: [EncoderLevel; 18] = [
        EncoderLevel::Auto,
        EncoderLevel::L1_0,
        EncoderLevel::L1b,
        EncoderLevel::L1_1,
        EncoderLevel::L1_2,
        EncoderLevel::L1_3,
        EncoderLevel::L2_0,
        EncoderLevel::L2_1,
        EncoderLevel::L2_2,
        EncoderLevel::L3_0,
        EncoderLevel::L3_1,
        EncoderLevel::L3_2,
        EncoderLevel::L4_0,
        EncoderLevel::L4_1,
        EncoderLevel::L4_2,
        EncoderLevel::L5_0,
        EncoderLevel::L5_1,
        EncoderLevel::L5_2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EncoderLevel::Auto => "auto",
            EncoderLevel::L1_0 => "1.0",
            EncoderLevel::L1b => "1b",
            EncoderLevel::L1_1 => "1.1",
            EncoderLevel::L1_2 => "1.2",
            EncoderLevel::L1_3 => "1.3",
            EncoderLevel::L2_0 => "2.0",
            EncoderLevel::L2_1 => "2.1",
            EncoderLevel::L2_2 => "2.2",
            EncoderLevel::L3_0 => "3.0",
            EncoderLevel::L3_1 => "3.1",
            EncoderLevel::L3_2 => "3.2",
            EncoderLevel::L4_0 => "4.0",
            EncoderLevel::L4_1 => "4.1",
            EncoderLevel::L4_2 => "4.2",
            EncoderLevel::L5_0 => "5.0",
            EncoderLevel::L5_1 => "5.1",
            EncoderLevel::L5_2 => "5.2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderProfile {
    Auto,
    High,
    Main,
    Baseline,
}

impl EncoderProfile {
    pub const ALL: [EncoderProfile; 4] = [
        EncoderProfile::Auto,
        EncoderProfile::High,
        EncoderProfile::Main,
        EncoderProfile::Baseline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EncoderProfile::Auto => "auto",
            EncoderProfile::High => "high",
            EncoderProfile::Main => "main",
            EncoderProfile::Baseline => "baseline",
        }
    }
}

fn lookup<T: Copy>(
    all: &[T],
    label: impl Fn(T) -> &'static str,
    option: &'static str,
    s: &str,
) -> Result<T, InvalidOption> {
    all.iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(s))
        .ok_or_else(|| InvalidOption {
            option,
            value: s.to_string(),
        })
}

impl FromStr for EncoderPreset {
    type Err = InvalidOption;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, Self::as_str, "encoder preset", s)
    }
}

impl FromStr for EncoderTune {
    type Err = InvalidOption;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, Self::as_str, "encoder tune", s)
    }
}

impl FromStr for EncoderLevel {
    type Err = InvalidOption;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, Self::as_str, "encoder level", s)
    }
}

impl FromStr for EncoderProfile {
    type Err = InvalidOption;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, Self::as_str, "encoder profile", s)
    }
}

impl fmt::Display for EncoderPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EncoderTune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EncoderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EncoderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn invalid<T: fmt::Display>(warnings: &mut Vec<LogEntry>, key: &str, default: T) -> T {
    warnings.push(LogEntry::warning(format!(
        "Invalid value for {}, defaulted to {}",
        key, default
    )));
    default
}

fn int_option(
    raw: Option<&Value>,
    key: &str,
    default: u32,
    accept: impl Fn(i64) -> bool,
    warnings: &mut Vec<LogEntry>,
) -> u32 {
    let Some(value) = raw else {
        return default;
    };
    let parsed = value_text(value)
        .and_then(|t| parse_leading_int(&t))
        .filter(|v| accept(*v))
        .and_then(|v| u32::try_from(v).ok());
    match parsed {
        Some(v) => v,
        None => invalid(warnings, key, default),
    }
}

fn float_option(
    raw: Option<&Value>,
    key: &str,
    default: f64,
    range: std::ops::RangeInclusive<f64>,
    warnings: &mut Vec<LogEntry>,
) -> f64 {
    let Some(value) = raw else {
        return default;
    };
    let parsed = value_text(value)
        .and_then(|t| parse_leading_float(&t))
        .filter(|v| range.contains(v));
    match parsed {
        // `-0` is in range; fold it so it renders as `0`.
        Some(v) => v + 0.0,
        None => invalid(warnings, key, default),
    }
}

fn bool_option(raw: Option<&Value>, key: &str, default: bool, warnings: &mut Vec<LogEntry>) -> bool {
    let Some(value) = raw else {
        return default;
    };
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    };
    match parsed {
        Some(v) => v,
        None => invalid(warnings, key, default),
    }
}

fn enum_option<T>(raw: Option<&Value>, key: &str, default: T, warnings: &mut Vec<LogEntry>) -> T
where
    T: FromStr + fmt::Display,
{
    let Some(value) = raw else {
        return default;
    };
    match value_text(value).map(|text| text.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => invalid(warnings, key, default),
    }
}

/// Validate every option independently, substituting the documented default
/// (and recording one warning) for each present value that is unparseable or
/// out of range. Absent options default silently.
pub fn normalize_config(raw: &RawConfig) -> (EncodingConfig, Vec<LogEntry>) {
    let defaults = EncodingConfig::default();
    let mut warnings = Vec::new();

    let config = EncodingConfig {
        max_video_width: int_option(
            raw.max_video_width.as_ref(),
            "max_video_width",
            defaults.max_video_width,
            |v| v > 0,
            &mut warnings,
        ),
        auto_crop: bool_option(
            raw.auto_crop.as_ref(),
            "auto_crop",
            defaults.auto_crop,
            &mut warnings,
        ),
        use_crf: bool_option(raw.use_crf.as_ref(), "use_crf", defaults.use_crf, &mut warnings),
        crf_quality: float_option(
            raw.crf_quality.as_ref(),
            "crf_quality",
            defaults.crf_quality,
            CRF_RANGE,
            &mut warnings,
        ),
        video_bitrate_kbps: int_option(
            raw.video_bitrate.as_ref(),
            "video_bitrate",
            defaults.video_bitrate_kbps,
            |v| v >= MIN_VIDEO_BITRATE_KBPS,
            &mut warnings,
        ),
        audio_bitrate_kbps: int_option(
            raw.audio_bitrate.as_ref(),
            "audio_bitrate",
            defaults.audio_bitrate_kbps,
            |v| AUDIO_BITRATE_RANGE_KBPS.contains(&v),
            &mut warnings,
        ),
        extract_subs: bool_option(
            raw.extract_subs.as_ref(),
            "extract_subs",
            defaults.extract_subs,
            &mut warnings,
        ),
        encoder_preset: enum_option(
            raw.encoder_preset.as_ref(),
            "encoder_preset",
            defaults.encoder_preset,
            &mut warnings,
        ),
        encoder_tune: enum_option(
            raw.encoder_tune.as_ref(),
            "encoder_tune",
            defaults.encoder_tune,
            &mut warnings,
        ),
        encoder_level: enum_option(
            raw.encoder_level.as_ref(),
            "encoder_level",
            defaults.encoder_level,
            &mut warnings,
        ),
        encoder_profile: enum_option(
            raw.encoder_profile.as_ref(),
            "encoder_profile",
            defaults.encoder_profile,
            &mut warnings,
        ),
    };

    (config, warnings)
}

/// Load raw options from a TOML (`.toml`) or JSON file.
///
/// A missing path or missing file yields an empty [`RawConfig`], so every
/// option takes its default.
pub fn load_raw_config(path: Option<&Path>) -> Result<RawConfig> {
    let Some(config_path) = path else {
        tracing::info!("No config path provided, using defaults");
        return Ok(RawConfig::default());
    };

    if !config_path.exists() {
        tracing::warn!("Config file not found at {:?}, using defaults", config_path);
        return Ok(RawConfig::default());
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

    let is_toml = config_path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&contents).context("Failed to parse TOML config")
    } else {
        serde_json::from_str(&contents).context("Failed to parse JSON config")
    }
}
