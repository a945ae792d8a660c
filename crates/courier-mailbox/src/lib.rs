mod config;
pub use config::MailboxConfig;

mod entry;
pub use entry::EntryId;

mod error;
pub use error::{MailboxError, MailboxResult};

mod mailbox;
pub use mailbox::{CommandMailbox, PollPolicy, SubmitOutcome};
