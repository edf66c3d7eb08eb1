//! Tracing subscriber setup.
//!
//! Logs always go to stderr; stdout is reserved for command output.

use std::str::FromStr;

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::CommandError;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(CommandError::InvalidArgument(format!(
                "unknown log format '{other}' (expected pretty or json)"
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Settings for the CLI: `warn` normally, `debug` with `--verbose`.
    pub fn for_cli(verbose: bool, format: LogFormat) -> Self {
        let level = if verbose {
            "support_router=debug,tower_http=debug,info"
        } else {
            "support_router=warn,warn"
        };
        Self {
            level: level.to_string(),
            format,
        }
    }

    /// Settings for the HTTP server, which logs each request at `info`.
    pub fn for_server(verbose: bool, format: LogFormat) -> Self {
        let level = if verbose {
            "support_router=debug,tower_http=debug,info"
        } else {
            "support_router=info,tower_http=info,warn"
        };
        Self {
            level: level.to_string(),
            format,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`]. Calling this
/// twice leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let filter = config.filter();

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(level = %config.level, format = ?config.format, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("pretty", LogFormat::Pretty)]
    #[test_case("TEXT", LogFormat::Pretty ; "text alias")]
    #[test_case(" json ", LogFormat::Json ; "padded json")]
    fn test_parse_log_format(raw: &str, expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>().ok(), Some(expected));
    }

    #[test]
    fn test_parse_log_format_rejects_unknown() {
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_verbose_raises_level() {
        assert!(
            LoggingConfig::for_cli(true, LogFormat::Pretty)
                .level
                .contains("support_router=debug")
        );
        assert!(
            LoggingConfig::for_cli(false, LogFormat::Pretty)
                .level
                .starts_with("support_router=warn")
        );
        assert!(
            LoggingConfig::for_server(false, LogFormat::Json)
                .level
                .contains("tower_http=info")
        );
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let config = LoggingConfig::for_cli(false, LogFormat::Pretty);
        init_logging(&config);
        init_logging(&config);
    }
}
