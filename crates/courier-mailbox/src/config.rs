use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Location of the on-disk mailbox shared with the consumer process.
///
/// The three sub-directories and the `.`-separated suffix convention are
/// the wire contract with the external consumer; they must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailboxConfig {
    /// Local-command root the agent watches.
    pub root: PathBuf,
}

impl MailboxConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the submitter drops fresh entries.
    pub fn pending_dir(&self) -> PathBuf {
        self.root.join("pending")
    }

    /// Where the consumer moves accepted entries, as `<id>.<consumerId>`.
    pub fn submitted_dir(&self) -> PathBuf {
        self.root.join("submitted")
    }

    /// Where the consumer moves rejected entries.
    pub fn invalid_dir(&self) -> PathBuf {
        self.root.join("invalid")
    }

    pub fn pending_path(&self, name: &str) -> PathBuf {
        self.pending_dir().join(name)
    }
}

impl AsRef<Path> for MailboxConfig {
    fn as_ref(&self) -> &Path {
        &self.root
    }
}
