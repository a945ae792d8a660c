use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{format::LogFormat, level::LogLevel};

/// Logging configuration, usually deserialized from an agent config file
/// or assembled from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Level filter expression (e.g. "info", "courier_mailbox=debug,info").
    pub level: LogLevel,
    /// Whether to include module targets in log lines.
    pub with_targets: bool,
    /// Whether colored output is allowed.
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    /// Color is applied only when allowed by config AND stdout is a
    /// terminal. Evaluated at init time, not at parse time, so redirects
    /// are detected correctly.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
