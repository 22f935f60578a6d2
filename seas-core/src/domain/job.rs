//! Job domain types

use serde::{Deserialize, Serialize};

/// Status reported for a job that finished successfully
pub const STATUS_DONE: &str = "Done";

/// Prefix of statuses reported when a processing step exits non-zero
pub const STATUS_FAILED_PREFIX: &str = "Failed";

/// Prefix of statuses reported when a processing step could not be run
pub const STATUS_ERROR_PREFIX: &str = "Error";

/// One batch job as reported by the job directory
///
/// `name` is unique within a listing and doubles as the backend's storage key.
/// `timestamp` is display-only and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,
    pub timestamp: String,
    pub status: String,
}

impl JobRecord {
    /// Whether this job has reached a terminal status
    pub fn is_terminal(&self) -> bool {
        is_terminal(&self.status)
    }
}

/// Lifecycle gate: does `status` describe a job that will not progress further?
///
/// The status vocabulary is open-ended. Only an exact `Done` or a status
/// starting with `Failed` or `Error` is terminal; anything else, including
/// statuses this client has never seen, counts as still in progress.
/// Matching is case-sensitive.
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_DONE
        || status.starts_with(STATUS_FAILED_PREFIX)
        || status.starts_with(STATUS_ERROR_PREFIX)
}
