//! Logging initialisation
//!
//! Structured logging through `tracing`, configured from the environment:
//!
//! | Variable                   | Values                          | Default   |
//! |----------------------------|---------------------------------|-----------|
//! | `MCPCLI_LOG_LEVEL`         | trace, debug, info, warn, error | `info`    |
//! | `MCPCLI_LOG_FORMAT`        | pretty, json, compact           | `compact` |
//! | `MCPCLI_LOG_TARGET_FILTER` | extra directives, comma separated | none    |
//! | `MCPCLI_LOG_ASYNC`         | true, false                     | `false`   |
//!
//! `RUST_LOG` takes precedence over `MCPCLI_LOG_LEVEL` when set. Logs go to
//! stderr; stdout belongs to command output and to the test harness.

use anyhow::{Context, Result};
use std::env;
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// trace, debug, info, warn or error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra filter directives (comma-separated), e.g. `mcpcli::generator=debug`
    pub target_filter: Option<String>,
    /// Write through a background thread
    pub async_logging: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Compact,
            target_filter: None,
            async_logging: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("MCPCLI_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: lookup("MCPCLI_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            target_filter: lookup("MCPCLI_LOG_TARGET_FILTER").filter(|s| !s.trim().is_empty()),
            async_logging: lookup("MCPCLI_LOG_ASYNC")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.async_logging),
        }
    }

    /// Override the level, as `--verbose` and `--quiet` do.
    pub fn with_level(mut self, level: Level) -> Self {
        self.log_level = level.as_str().to_lowercase();
        self
    }

    pub fn level(&self) -> Level {
        match self.log_level.trim().to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Filter from `RUST_LOG` when set, else from the configured level, plus
    /// any extra target directives.
    pub fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));
        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

fn fmt_layer<W>(format: LogFormat, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(writer)
            .boxed(),
    }
}

/// Install the global subscriber.
///
/// In async mode the returned guard must be kept alive until exit, otherwise
/// buffered lines are lost.
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = config.env_filter();
    if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(io::stderr());
        tracing_subscriber::registry()
            .with(fmt_layer(config.format, non_blocking))
            .with(env_filter)
            .try_init()
            .context("Failed to initialize async logging")?;
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(fmt_layer(config.format, io::stderr))
            .with(env_filter)
            .try_init()
            .context("Failed to initialize logging")?;
        Ok(None)
    }
}
