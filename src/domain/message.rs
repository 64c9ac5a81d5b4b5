use std::fmt;

use chrono::NaiveDateTime;

pub const AUTO_COMMIT_PREFIX: &str = "Auto commit: ";
const AUTO_COMMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A commit message that is guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    /// Keeps `raw` verbatim unless it is blank, in which case a timestamped
    /// default is generated from `now`.
    pub fn resolve(raw: &str, now: NaiveDateTime) -> Self {
        if raw.trim().is_empty() {
            Self::auto(now)
        } else {
            Self(raw.to_string())
        }
    }

    pub fn auto(now: NaiveDateTime) -> Self {
        Self(format!(
            "{AUTO_COMMIT_PREFIX}{}",
            now.format(AUTO_COMMIT_TIME_FORMAT)
        ))
    }

    pub fn is_auto(&self) -> bool {
        self.0
            .strip_prefix(AUTO_COMMIT_PREFIX)
            .is_some_and(|rest| NaiveDateTime::parse_from_str(rest, AUTO_COMMIT_TIME_FORMAT).is_ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
