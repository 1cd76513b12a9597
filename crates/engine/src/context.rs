//! Per-invocation decision state shared by the pipeline stages.

use crate::analyze::StreamAnalysis;
use crate::config::EncodingConfig;
use crate::geometry::Geometry;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Failure,
}

impl LogLevel {
    pub fn glyph(self) -> &'static str {
        match self {
            LogLevel::Info => "🔎",
            LogLevel::Success => "✅",
            LogLevel::Warning => "⚠",
            LogLevel::Failure => "❌",
        }
    }
}

/// One human-readable line of the decision log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.glyph(), self.message)
    }
}

/// Ordered log lines appended by each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionLog {
    entries: Vec<LogEntry>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Success, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Warning, message));
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Failure, message));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.level == LogLevel::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten to the newline-terminated text handed back to the orchestrator.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

impl Extend<LogEntry> for DecisionLog {
    fn extend<T: IntoIterator<Item = LogEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NormalizeConfig,
    CheckIdempotency,
    ClassifyMedium,
    AnalyzeStreams,
    ResolveGeometry,
    SynthesizeCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    AlreadyCompressed,
    NotVideo,
    Process,
}

#[derive(Debug, Clone, Default)]
pub struct DecisionContext {
    pub config: EncodingConfig,
    pub log: DecisionLog,
    pub analysis: StreamAnalysis,
    pub geometry: Geometry,
    pub command: Vec<String>,
    pub decision: Option<Decision>,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Hook invoked with the context before every stage runs.
pub trait StageObserver {
    fn before_stage(&mut self, stage: Stage, ctx: &DecisionContext);
}

impl<F> StageObserver for F
where
    F: FnMut(Stage, &DecisionContext),
{
    fn before_stage(&mut self, stage: Stage, ctx: &DecisionContext) {
        self(stage, ctx)
    }
}

pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn before_stage(&mut self, _stage: Stage, _ctx: &DecisionContext) {}
}

/// Dumps the whole context at debug level before each stage.
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn before_stage(&mut self, stage: Stage, ctx: &DecisionContext) {
        debug!(?stage, context = ?ctx, "entering stage");
    }
}
