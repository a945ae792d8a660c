use courier_mailbox::MailboxError;
use courier_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Complete list of input-shape violations, one per line. Always the
    /// full list, never a partial report.
    #[error("{0}")]
    Validation(String),

    #[error("failed to load command content: {0}")]
    Load(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Mailbox(#[from] MailboxError),
}

pub type CoreResult<T> = Result<T, CoreError>;
