//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: failed files, unreadable configuration
//! - `warn`: files where no column could be detected, encoding fallbacks
//! - `info`: per-file detection and planning counts
//! - `debug`: per-field matches, per-row validation issues
//! - `trace`: fields that matched nothing
//!
//! Customer values are personal data. They only reach the log through
//! [`redact_value`], which hides them unless `--log-data` was given.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged in place of customer values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level.
const WORKSPACE_CRATES: [&str; 4] = ["crm_cli", "crm_ingest", "crm_map", "crm_model"];

/// Returns true if customer values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to workspace crates.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may replace the configured filter.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Whether to include the module path in log output.
    pub with_target: bool,
    /// Whether JSON output records span closings.
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Log file path; logs go to stderr when `None`.
    pub log_file: Option<PathBuf>,
    /// Whether customer values may be logged.
    pub log_data: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level_filter = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Filter directives: workspace crates at the configured level,
    /// everything else at `warn` or quieter.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let others = self.level_filter.min(LevelFilter::WARN).to_string().to_lowercase();
        let mut directives = vec![others];
        directives.extend(
            WORKSPACE_CRATES
                .iter()
                .map(|krate| format!("{krate}={level}")),
        );
        directives.join(",")
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let result = if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file))
    } else {
        init_logging_with_writer(config, io::stderr)
    };
    result.map_err(io::Error::other)
}

/// Initialize logging with a custom writer (useful for testing).
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<(), TryInitError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(fmt_layer(config, writer))
        .with(build_env_filter(config))
        .try_init()
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn fmt_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    let ansi = config.with_ansi;

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => base
            .json()
            .with_span_events(if config.with_spans {
                fmt::format::FmtSpan::CLOSE
            } else {
                fmt::format::FmtSpan::NONE
            })
            .boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(ansi).boxed(),
        (LogFormat::Compact, false) => base.compact().with_ansi(ansi).without_time().boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(ansi).without_time().boxed(),
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directives())
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileGuard {
    fn with_file<T>(&self, op: impl FnOnce(&mut std::fs::File) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        op(&mut guard)
    }
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(Write::flush)
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_keep_dependencies_quiet() {
        let config = LogConfig::default().with_level(LevelFilter::DEBUG);
        assert_eq!(
            config.directives(),
            "warn,crm_cli=debug,crm_ingest=debug,crm_map=debug,crm_model=debug"
        );
    }

    #[test]
    fn quiet_levels_apply_everywhere() {
        let config = LogConfig::default().with_level(LevelFilter::ERROR);
        assert!(config.directives().starts_with("error,crm_cli=error"));
    }

    #[test]
    fn builders_set_output_options() {
        let config = LogConfig::default()
            .with_format(LogFormat::Json)
            .with_ansi(false)
            .with_log_file(Some(PathBuf::from("import.log")))
            .with_log_data(true);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
        assert_eq!(config.log_file, Some(PathBuf::from("import.log")));
        assert!(config.log_data);
        assert_eq!(config.level_filter, LevelFilter::WARN);
    }

    #[test]
    fn redaction_follows_log_data_flag() {
        LOG_DATA_ENABLED.store(false, Ordering::Release);
        assert_eq!(redact_value("0712345678"), REDACTED_VALUE);
        LOG_DATA_ENABLED.store(true, Ordering::Release);
        assert_eq!(redact_value("0712345678"), "0712345678");
        LOG_DATA_ENABLED.store(false, Ordering::Release);
    }
}
