//! Tracing subscriber setup for hosts that have none of their own

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Logging options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset (`info`, `recast_recipe=debug`, ...)
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Install a global fmt subscriber
///
/// `RUST_LOG` wins over `config.level`; an unparsable level falls back to
/// `info`. Returns `false` if a global subscriber was already installed, in
/// which case nothing changes.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = if config.json {
        fmt().json().with_env_filter(filter).try_init()
    } else {
        fmt().compact().with_env_filter(filter).try_init()
    };
    installed.is_ok()
}
