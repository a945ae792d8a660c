use std::fmt;

use uuid::Uuid;

/// Unique name of one mailbox entry, generated by the submitter.
///
/// A processed entry is renamed by the consumer to `<id>.<consumerId>`;
/// the suffix after the LAST dot is the consumer-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// If `file_name` is the processed form of this entry, returns the
    /// consumer-assigned suffix.
    pub fn match_processed<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if !file_name.starts_with(self.as_str()) {
            return None;
        }
        match file_name.rfind('.') {
            Some(dot) if dot + 1 < file_name.len() => Some(&file_name[dot + 1..]),
            _ => None,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId(s.to_string())
    }
}
