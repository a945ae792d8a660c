mod config;
mod error;
mod format;
mod level;
mod log;
mod stamp;

pub use config::LogConfig;
pub use error::{ObserveError, ObserveResult};
pub use format::LogFormat;
pub use level::LogLevel;

/// Installs the global tracing subscriber described by `cfg`.
///
/// After this call every `tracing` macro in the process goes through the
/// configured output. Calling it a second time fails with
/// [`ObserveError::AlreadyInitialized`].
pub fn init_logging(cfg: &LogConfig) -> ObserveResult<()> {
    match cfg.format {
        LogFormat::Text => log::init_text(cfg),
        LogFormat::Json => log::init_json(cfg),
        LogFormat::Journald => log::init_journald(cfg),
    }
}
