//! Logging configuration and initialization.
//!
//! Events go to stderr so `--json` command output on stdout stays
//! line-delimited.

use std::fmt;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

/// Chatty transport crates held at `warn` unless the level names them.
const QUIET_TARGETS: &[&str] = &["hyper_util", "reqwest", "alloy_transport_http"];

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `debug` or `yieldroute=trace,info`.
    /// `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Filter built from `level` plus the quiet transport targets.
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not a valid filter directive.
    pub fn filter(&self) -> Result<EnvFilter, ConfigError> {
        let mut directives = self.level.trim().to_string();
        for target in QUIET_TARGETS {
            if !directives.contains(target) {
                directives.push_str(&format!(",{target}=warn"));
            }
        }
        EnvFilter::try_new(&directives).map_err(|e| ConfigError::InvalidValue {
            field: "logging.level",
            reason: e.to_string(),
        })
    }

    /// Install the global subscriber. A second call is a no-op.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| self.filter())
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Pretty => builder.try_init(),
        };
        if installed.is_err() {
            tracing::debug!("Tracing subscriber already installed");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}
