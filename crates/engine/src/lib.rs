// Decision engine for the HandBrake compression step of a transcode queue

pub mod analyze;
pub mod classify;
pub mod config;
pub mod context;
pub mod details;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod idempotency;
pub mod media;
pub mod pipeline;
pub mod rational;
pub mod result;

// Re-export commonly used types
pub use config::{load_raw_config, EncodingConfig, RawConfig};
pub use context::{DecisionContext, Stage, StageObserver, TracingObserver};
pub use media::{load_media_file, MediaFile, Stream};
pub use pipeline::{decide, decide_with_observer};
pub use result::PluginResult;
