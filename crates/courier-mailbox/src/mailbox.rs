use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, info, trace};

use crate::{
    config::MailboxConfig,
    entry::EntryId,
    error::{MailboxError, MailboxResult},
};

/// Terminal state of one submitted entry, as observed by polling.
///
/// All three variants are successful observations. A rejected or expired
/// entry is a business outcome, not a mailbox failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The consumer accepted the entry and assigned it an id of its own.
    Submitted { consumer_id: String },
    /// The consumer rejected the entry.
    Invalid,
    /// No consumer transition within the polling window; the pending copy
    /// has been removed.
    TimedOut,
}

/// Bounded polling parameters for [`CommandMailbox::poll_outcome`].
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_millis(500),
        }
    }
}

/// Directory-backed hand-off queue between this submitter and the
/// out-of-process consumer.
///
/// The submitter owns entry creation and the pending-side cleanup on
/// timeout. The consumer exclusively owns the submitted/invalid
/// transition; nothing here ever writes to those directories.
#[derive(Debug, Clone)]
pub struct CommandMailbox {
    config: MailboxConfig,
}

impl CommandMailbox {
    pub fn new(config: MailboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MailboxConfig {
        &self.config
    }

    /// Drops `payload` into the pending area under a fresh entry id.
    ///
    /// The bytes land in a temp file in the pending directory first and
    /// are renamed into place, so the consumer can never observe a
    /// partially written entry.
    pub fn submit(&self, payload: &str) -> MailboxResult<EntryId> {
        let id = EntryId::generate();
        let pending = self.config.pending_dir();

        if let Err(e) = std::fs::create_dir_all(&pending) {
            debug!(dir = %pending.display(), error = %e, "failed to create pending area");
            return Err(MailboxError::SubmitFailed);
        }

        let mut staged = NamedTempFile::new_in(&pending)?;
        staged.write_all(payload.as_bytes())?;
        staged
            .persist(self.config.pending_path(id.as_str()))
            .map_err(|e| MailboxError::Io(e.error))?;

        info!(entry = %id, "command dropped into pending area");
        Ok(id)
    }

    /// Waits for the consumer to move the entry out of pending.
    ///
    /// Each attempt sleeps `policy.interval`, then scans submitted before
    /// invalid; the first match wins. On exhaustion the pending copy is
    /// removed best-effort and both areas are checked once more, since the
    /// consumer may have transitioned the entry while cleanup ran. A
    /// transition landing after that final check is invisible to the
    /// caller.
    pub async fn poll_outcome(&self, id: &EntryId, policy: PollPolicy) -> SubmitOutcome {
        for attempt in 0..policy.max_attempts {
            tokio::time::sleep(policy.interval).await;

            trace!(entry = %id, attempt, "scanning for consumer transition");
            if let Some(outcome) = self.scan_once(id) {
                return outcome;
            }
        }

        let pending = self.config.pending_path(id.as_str());
        if let Err(e) = std::fs::remove_file(&pending) {
            debug!(entry = %id, error = %e, "could not remove pending entry after timeout");
        }

        match self.scan_once(id) {
            Some(outcome) => outcome,
            None => {
                info!(entry = %id, "no consumer transition within the polling window");
                SubmitOutcome::TimedOut
            }
        }
    }

    fn scan_once(&self, id: &EntryId) -> Option<SubmitOutcome> {
        if let Some(consumer_id) = find_processed(&self.config.submitted_dir(), id) {
            return Some(SubmitOutcome::Submitted { consumer_id });
        }

        if find_processed(&self.config.invalid_dir(), id).is_some() {
            return Some(SubmitOutcome::Invalid);
        }

        None
    }
}

/// Listing errors mean "nothing to see yet": the consumer may not have
/// created its directories at all.
fn find_processed(dir: &Path, id: &EntryId) -> Option<String> {
    let entries = std::fs::read_dir(dir).ok()?;

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        if let Some(suffix) = id.match_processed(name) {
            return Some(suffix.to_string());
        }
    }

    None
}
