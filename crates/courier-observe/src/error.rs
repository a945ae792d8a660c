use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("Invalid log format: {0} (expected: text|json|journald)")]
    InvalidFormat(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Journald is not supported on this platform")]
    JournaldNotSupported,

    #[error("Failed to initialize journald: {0}")]
    JournaldInitFailed(String),

    #[error("Logging already initialized")]
    AlreadyInitialized,
}

pub type ObserveResult<T> = Result<T, ObserveError>;
