use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailboxError {
    /// The pending area could not be prepared. Deliberately generic:
    /// filesystem detail stays in the logs, not in the caller-facing error.
    #[error("failed to submit command to the mailbox")]
    SubmitFailed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type MailboxResult<T> = Result<T, MailboxError>;
