use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::LogConfig,
    error::{ObserveError, ObserveResult},
    stamp::UtcRfc3339,
};

pub fn init_text(cfg: &LogConfig) -> ObserveResult<()> {
    let filter = cfg.level.to_env_filter();
    let fmt_layer = fmt::layer()
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    init_subscriber(subscriber)
}

pub fn init_json(cfg: &LogConfig) -> ObserveResult<()> {
    let filter = cfg.level.to_env_filter();
    let fmt_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    init_subscriber(subscriber)
}

#[cfg(target_os = "linux")]
pub fn init_journald(cfg: &LogConfig) -> ObserveResult<()> {
    let filter = cfg.level.to_env_filter();
    let journald =
        tracing_journald::layer().map_err(|e| ObserveError::JournaldInitFailed(e.to_string()))?;

    let subscriber = tracing_subscriber::registry().with(filter).with(journald);
    init_subscriber(subscriber)
}

/// Stub for journald on non-Linux platforms.
#[cfg(not(target_os = "linux"))]
pub fn init_journald(_cfg: &LogConfig) -> ObserveResult<()> {
    Err(ObserveError::JournaldNotSupported)
}

fn init_subscriber<S>(subscriber: S) -> ObserveResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| ObserveError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LogFormat;

    #[test]
    fn text_config_carries_level_and_format() {
        let config = LogConfig {
            format: LogFormat::Text,
            level: "info".parse().unwrap(),
            with_targets: true,
            use_color: false,
        };

        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level.as_str(), "info");
    }

    #[test]
    #[cfg(not(target_os = "linux"))]
    fn journald_is_rejected_off_linux() {
        let config = LogConfig::default();
        assert!(matches!(
            init_journald(&config),
            Err(ObserveError::JournaldNotSupported)
        ));
    }

    #[test]
    fn filter_builds_from_compound_expression() {
        let config = LogConfig {
            level: "courier_core=debug,info".parse().unwrap(),
            ..Default::default()
        };

        let filter = config.level.to_env_filter();
        let _ = format!("{:?}", filter);
    }
}
