use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unsupported schema version {0}")]
    UnsupportedSchemaVersion(String),

    #[error("runtimeConfig cannot be empty")]
    EmptyRuntimeConfig,

    #[error("mainSteps cannot be empty")]
    EmptyMainSteps,

    #[error("invalid version string: {0}")]
    InvalidVersion(String),

    #[error("document serialization failed: {0}")]
    Serialize(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
