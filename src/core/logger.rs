//! Main logger implementation
//!
//! A [`Logger`] is an immutable snapshot. Every `with_*` method clones the
//! receiver, changes one thing, and returns the clone; the receiver is never
//! touched. Field maps and caller lists are copied on each derivation while the
//! line writer (and through it the sink) is shared by reference count.

use super::{
    caller::{self, DEFAULT_MAX_CALLER_DEPTH},
    context::Context,
    error::Result,
    fields::{FieldValue, Fields},
    log_level::{LogLevel, SeverityAction},
    output::{Flags, Output},
    output_format::OutputFormat,
    record::Record,
    sink::Sink,
};
use crate::sinks::WriterSink;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

const WITH_CALLER_ANCHOR: &str = "Logger::with_caller";
const WITH_CALLERS_FRAMES_ANCHOR: &str = "Logger::with_callers_frames_depth";

#[derive(Clone)]
pub struct Logger {
    output: Arc<Output>,
    context: Option<Context>,
    fields: Fields,
    callers: Vec<String>,
    format: OutputFormat,
}

impl Logger {
    /// Wrap any byte writer. The writer is put behind a lock so that each
    /// line reaches it in one piece.
    #[must_use]
    pub fn new<W>(writer: W, prefix: impl Into<String>, flags: Flags) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_sink(Arc::new(WriterSink::new(writer)), prefix, flags)
    }

    #[must_use]
    pub fn from_sink(sink: Arc<dyn Sink>, prefix: impl Into<String>, flags: Flags) -> Self {
        Self::from_output(Arc::new(Output::new(sink, prefix, flags)), OutputFormat::Text)
    }

    fn from_output(output: Arc<Output>, format: OutputFormat) -> Self {
        Self {
            output,
            context: None,
            fields: Fields::new(),
            callers: Vec::new(),
            format,
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn callers(&self) -> &[String] {
        &self.callers
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn output(&self) -> &Arc<Output> {
        &self.output
    }

    /// Derive a logger carrying `fields` on top of the current ones.
    /// Incoming values replace same-named existing values.
    #[must_use]
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        let mut derived = self.clone();
        derived.fields.extend_overwrite(fields.into());
        derived
    }

    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_fields(Fields::new().with(key, value))
    }

    /// Derive a logger holding `context`, replacing any previous one.
    #[must_use]
    pub fn with_context(&self, context: Context) -> Self {
        let mut derived = self.clone();
        derived.context = Some(context);
        derived
    }

    #[must_use]
    pub fn with_format(&self, format: OutputFormat) -> Self {
        let mut derived = self.clone();
        derived.format = format;
        derived
    }

    /// Derive a logger whose callers list is the single frame `skip` levels up
    /// from this call: 0 is this method, 1 its caller, and so on.
    ///
    /// The descriptor reads `"<file>:<line> <function>"`. If the frame cannot be
    /// resolved, or resolves without a file and line, the derived logger has no
    /// callers.
    ///
    /// Positions count inlined functions, which only survive in the stack with
    /// debug info. Accurate attribution in optimized builds needs at least
    /// `debug = "line-tables-only"` in the profile.
    #[must_use]
    #[inline(never)]
    pub fn with_caller(&self, skip: usize) -> Self {
        let mut derived = self.clone();
        derived.callers = caller::capture_one(WITH_CALLER_ANCHOR, skip)
            .map(|frame| vec![frame.descriptor()])
            .unwrap_or_default();
        derived
    }

    /// Derive a logger whose callers list is the stack walked from the caller
    /// of this method outwards, at most 25 frames.
    #[must_use]
    #[inline(never)]
    pub fn with_callers_frames(&self) -> Self {
        self.with_callers_frames_depth(DEFAULT_MAX_CALLER_DEPTH)
    }

    /// Like [`Logger::with_callers_frames`] with an explicit bound. Each entry
    /// reads `"<file>: <line> <function>"`.
    #[must_use]
    #[inline(never)]
    pub fn with_callers_frames_depth(&self, max_depth: usize) -> Self {
        // frame 1 above the anchor is with_callers_frames when called through it
        let frames = caller::capture_frames(WITH_CALLERS_FRAMES_ANCHOR, max_depth + 1);
        let skip = usize::from(
            frames
                .first()
                .is_some_and(|f| caller::is_anchor(&f.function, "Logger::with_callers_frames")),
        );

        let mut derived = self.clone();
        derived.callers = frames
            .iter()
            .skip(skip)
            .take(max_depth)
            .map(|frame| frame.frame_descriptor())
            .collect();
        derived
    }

    /// The record a call at `level` would produce right now.
    pub fn format_fields(&self, level: LogLevel, message: &str) -> Record {
        Record::new(level, message, &self.callers, &self.fields)
    }

    /// The line body a call at `level` would produce in the configured format.
    pub fn render(&self, level: LogLevel, message: &str) -> String {
        self.format.format(&self.format_fields(level, message))
    }

    /// Render and write one record, then apply the level's severity action.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit_as(self.format, level, &message.into());
    }

    /// Emit in the text layout regardless of the configured format.
    pub fn output_text(&self, level: LogLevel, message: impl Into<String>) {
        self.emit_as(OutputFormat::Text, level, &message.into());
    }

    /// Emit as JSON regardless of the configured format.
    pub fn output_json(&self, level: LogLevel, message: impl Into<String>) {
        self.emit_as(OutputFormat::Json, level, &message.into());
    }

    fn emit_as(&self, format: OutputFormat, level: LogLevel, message: &str) {
        let content = format.format(&self.format_fields(level, message));
        match level.action() {
            SeverityAction::Continue => self.output.print(&content),
            SeverityAction::Terminate => self.output.fatal(&content),
            SeverityAction::Unwind => self.output.panic(content),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.output.flush()
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message.to_string());
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, fmt::format(args));
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message.to_string());
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, fmt::format(args));
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message.to_string());
    }

    #[inline]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, fmt::format(args));
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message.to_string());
    }

    #[inline]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, fmt::format(args));
    }

    /// Write the record, flush the sink, and exit the process with status 1.
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        let content = self.render(LogLevel::Fatal, &message.to_string());
        self.output.fatal(&content)
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(fmt::format(args))
    }

    /// Write the record, then panic with the rendered line as payload.
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        let content = self.render(LogLevel::Panic, &message.to_string());
        self.output.panic(content)
    }

    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic(fmt::format(args))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("output", &self.output)
            .field("context", &self.context)
            .field("fields", &self.fields)
            .field("callers", &self.callers)
            .field("format", &self.format)
            .finish()
    }
}

/// Builder for creating a Logger with fluent API
///
/// # Example
///
/// ```
/// use chainlog::{Flags, Logger, OutputFormat};
/// use chainlog::sinks::MemorySink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder()
///     .sink(sink.clone())
///     .prefix("api: ")
///     .flags(Flags::NONE)
///     .format(OutputFormat::Json)
///     .build();
///
/// logger.info("started");
/// assert!(sink.lines()[0].starts_with("api: {"));
/// ```
pub struct LoggerBuilder {
    sink: Option<Arc<dyn Sink>>,
    prefix: String,
    flags: Flags,
    format: OutputFormat,
}

impl LoggerBuilder {
    /// Create a new logger builder: stderr sink, no prefix, date and time header
    pub fn new() -> Self {
        Self {
            sink: None,
            prefix: String::new(),
            flags: Flags::STD,
            format: OutputFormat::Text,
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use any byte writer as the sink
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.sink(Arc::new(WriterSink::new(writer)))
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> Logger {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(crate::sinks::ConsoleSink::stderr()));
        Logger::from_output(
            Arc::new(Output::new(sink, self.prefix, self.flags)),
            self.format,
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a new logger builder
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
