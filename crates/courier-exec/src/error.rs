use courier_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid execution spec: {0}")]
    InvalidSpec(String),

    /// Non-zero child exit, after preemptive-stop remapping.
    #[error("command failed with exit code {exit_code}: {message}")]
    CommandFailed { exit_code: i32, message: String },

    #[error("service probe failed: {0}")]
    ProbeFailed(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type ExecResult<T> = Result<T, ExecError>;
