//! Structured logging to the browser console using tracing.
//!
//! Provides:
//! - Development and production presets
//! - A level-aware writer that routes events to `console.error`, `console.warn`,
//!   `console.info` or `console.debug`
//!
//! Timestamps and ANSI colors are disabled: the browser console provides both.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use wasm_bindgen::JsValue;

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Maximum log level for Loadveil crates.
    pub level: Level,
    /// Maximum log level for dependencies.
    pub dependency_level: Level,
    /// Whether to include file/line info in logs.
    pub include_file_line: bool,
    /// Whether to include target module in logs.
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Create a development configuration with verbose logging.
    #[must_use]
    pub const fn development() -> Self {
        Self {
            level: Level::DEBUG,
            dependency_level: Level::WARN,
            include_file_line: true,
            include_target: true,
        }
    }

    /// Create a production configuration with minimal output.
    #[must_use]
    pub const fn production() -> Self {
        Self {
            level: Level::INFO,
            dependency_level: Level::WARN,
            include_file_line: false,
            include_target: false,
        }
    }

    /// Detect configuration based on build type.
    #[must_use]
    pub const fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Set the log level for Loadveil crates.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the log level for dependencies.
    #[must_use]
    pub const fn with_dependency_level(mut self, level: Level) -> Self {
        self.dependency_level = level;
        self
    }

    /// Filter directive equivalent to this configuration.
    pub fn directive(&self) -> String {
        let level = level_to_directive(self.level);
        format!(
            "{},loadveil_core={level},loadveil_ui={level}",
            level_to_directive(self.dependency_level)
        )
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("Invalid log filter directive: {0}")]
    InvalidDirective(String),

    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Initialize console logging with the given configuration.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(config.directive())
        .map_err(|e| LoggingError::InvalidDirective(e.to_string()))?;

    let console_layer = fmt::layer()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Initialize logging with automatic configuration detection.
pub fn init_auto() -> Result<(), LoggingError> {
    init(&LoggingConfig::auto())
}

/// Convert a tracing Level to a filter directive string.
const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Browser console method an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    /// `console.error`
    Error,
    /// `console.warn`
    Warn,
    /// `console.info`
    Info,
    /// `console.debug`
    Debug,
}

impl ConsoleMethod {
    /// Console method for events at `level`.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG | Level::TRACE => Self::Debug,
        }
    }

    fn emit(self, line: &JsValue) {
        match self {
            Self::Error => web_sys::console::error_1(line),
            Self::Warn => web_sys::console::warn_1(line),
            Self::Info => web_sys::console::info_1(line),
            Self::Debug => web_sys::console::debug_1(line),
        }
    }
}

/// Creates a [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it to the console when dropped.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    /// Console method this writer emits to.
    #[must_use]
    pub const fn method(&self) -> ConsoleMethod {
        ConsoleMethod::for_level(self.level)
    }

    /// Drain the buffered event as one line without its trailing newline.
    /// `None` when nothing was written.
    fn take_line(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let buffer = std::mem::take(&mut self.buffer);
        Some(String::from_utf8_lossy(&buffer).trim_end().to_string())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = self.take_line() {
            self.method().emit(&JsValue::from_str(&line));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_is_production() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.dependency_level, Level::WARN);
        assert!(!config.include_file_line);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.include_file_line);
        assert!(config.include_target);
    }

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::production()
            .with_level(Level::TRACE)
            .with_dependency_level(Level::ERROR);
        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.dependency_level, Level::ERROR);
    }

    #[test]
    fn test_directive() {
        let config = LoggingConfig::production();
        assert_eq!(
            config.directive(),
            "warn,loadveil_core=info,loadveil_ui=info"
        );
        assert!(EnvFilter::try_new(config.directive()).is_ok());
    }

    // =============================================================================
    // Console writer
    // =============================================================================

    #[test]
    fn test_levels_route_to_console_methods() {
        assert_eq!(ConsoleMethod::for_level(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::for_level(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::for_level(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::for_level(Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(ConsoleMethod::for_level(Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn test_default_writer_logs_at_info() {
        let writer = ConsoleMakeWriter.make_writer();
        assert_eq!(writer.method(), ConsoleMethod::Info);
        assert!(writer.buffer.is_empty());
    }

    #[test]
    fn test_writer_buffers_one_line() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        write!(writer, "overlay ").unwrap();
        writeln!(writer, "removed").unwrap();
        assert_eq!(writer.method(), ConsoleMethod::Warn);

        // Draining leaves nothing for drop to emit.
        assert_eq!(writer.take_line().as_deref(), Some("overlay removed"));
        assert!(writer.take_line().is_none());
    }
}
