use std::{convert::TryFrom, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::ObserveError;

/// Validated `EnvFilter` expression kept in its raw string form.
///
/// The string is checked with `EnvFilter::try_new` at construction, so a
/// stored `LogLevel` always converts to a filter without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LogLevel(String);

impl LogLevel {
    pub fn new(s: impl Into<String>) -> Result<Self, ObserveError> {
        Self::try_from(s.into())
    }

    /// Exactly the expression that was provided in config.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_env_filter(&self) -> EnvFilter {
        // Infallible: construction already validated the expression.
        EnvFilter::new(self.as_str())
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel("info".to_string())
    }
}

impl FromStr for LogLevel {
    type Err = ObserveError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ObserveError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LogLevel(s)),
            Err(e) => Err(ObserveError::InvalidLevel(format!("{}: {}", s, e))),
        }
    }
}

impl From<LogLevel> for String {
    fn from(l: LogLevel) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::LogLevel;

    #[test]
    fn accepts_valid_expressions() {
        for expr in ["info", "warn", "trace", "courier_exec=trace,info"] {
            assert!(
                expr.parse::<LogLevel>().is_ok(),
                "expected valid LogLevel for {expr}"
            );
        }
    }

    #[test]
    fn rejects_invalid_expressions() {
        for expr in ["courier_exec=verbose", "a=trace,b=wat"] {
            assert!(
                LogLevel::from_str(expr).is_err(),
                "expected error for {expr}"
            );
        }
    }

    #[test]
    fn default_is_info_and_convertible() {
        let level = LogLevel::default();
        assert_eq!(level.as_str(), "info");
        let _filter = level.to_env_filter();
    }

    #[test]
    fn serde_from_plain_string() {
        let level: LogLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(level.as_str(), "debug");
    }

    #[test]
    fn serde_roundtrip_preserves_expression() {
        let original: LogLevel = "courier_mailbox=trace,info".parse().unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let restored: LogLevel = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.as_str(), original.as_str());
    }
}
