//! Job DTOs for communication with the job directory

use serde::{Deserialize, Serialize};

/// Multipart field carrying the archive
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the batch name
pub const BATCH_NAME_FIELD: &str = "batchname";

/// Archive selected for upload as a new batch
///
/// Holds the bytes in memory so a failed submission can be retried without
/// re-reading the source.
#[derive(Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    /// File name sent as the multipart filename
    pub file_name: String,
    /// Raw archive contents
    pub bytes: Vec<u8>,
}

impl ArchiveFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ArchiveFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Reply to a create-job upload
///
/// A present `error` means the upload was refused even if the transport
/// status was a success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJobResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply to a delete-job request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteJobResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Accumulated log output for one batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<String>,
}

impl LogsResponse {
    /// Log lines joined for display
    pub fn joined(&self) -> String {
        self.logs.join("\n")
    }
}
