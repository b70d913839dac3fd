//! Logging and tracing configuration
//!
//! Console output goes to stderr so that the report on stdout stays clean for
//! piping. File output rolls daily through `tracing-appender`.

use std::io;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Boxed error returned by logging initialisation
pub type LoggingInitError = Box<dyn std::error::Error + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting on the console
    pub json_format: bool,
    /// Log file directory; file logging is off when `None`
    pub log_directory: Option<String>,
    /// Log file prefix
    pub log_file_prefix: String,
    /// Whether to log span open and close events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter, overrides `level`
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "scan-appointment-simulator".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

/// Keeps the non-blocking log writers flushing until dropped
#[must_use = "dropping the guard stops background log writers"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the command line verbosity flags
    ///
    /// `debug` wins over `verbose`; without either only warnings are shown.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        match (verbose, debug) {
            (_, true) => Self::new().with_level(Level::DEBUG).with_span_events(),
            (true, false) => Self::new().with_level(Level::INFO).with_span_events(),
            (false, false) => Self::new(),
        }
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggingInitError> {
        if let Some(filter) = &self.env_filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level))
        }))
    }

    /// Initialize the global tracing subscriber
    ///
    /// The returned guard must be held for as long as logging should reach the
    /// log file.
    pub fn init(self) -> Result<LoggingGuard, LoggingInitError> {
        let mut guard = LoggingGuard::default();

        let console_layer = if self.json_format {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
                .boxed()
        } else {
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_target(false)
                .with_span_events(self.span_events())
                .boxed()
        };

        let file_layer = match &self.log_directory {
            Some(directory) => {
                let (writer, worker) = non_blocking(rolling::daily(directory, &self.log_file_prefix));
                guard._guards.push(worker);
                Some(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_span_events(self.span_events())
                        .boxed(),
                )
            }
            None => None,
        };

        Registry::default()
            .with(self.build_filter()?)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        info!(level = %self.level, file_logging = self.log_directory.is_some(), "Logging initialized");
        Ok(guard)
    }
}

/// Emit a structured event tagged with the simulation component
#[macro_export]
macro_rules! sim_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            message = $message,
            component = "simulation",
            $($key = $value,)*
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(
            message = $message,
            component = "simulation",
        );
    };
}

/// Open an info span around a timed pipeline stage
#[macro_export]
macro_rules! perf_span {
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info_span!(
            $name,
            component = "performance",
            $($key = $value,)*
        )
    };
    ($name:expr) => {
        tracing::info_span!(
            $name,
            component = "performance",
        )
    };
}
