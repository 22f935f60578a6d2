//! Repository layer
//!
//! The dashboard reaches the job directory only through [`JobDirectory`], so
//! the poller and the action coordinator can run against an in-memory
//! directory in tests.

use async_trait::async_trait;
use seas_client::{JobDirectoryClient, Result};
use seas_core::domain::job::JobRecord;
use seas_core::dto::job::{ArchiveFile, CreateJobResponse, DeleteJobResponse};

/// Remote store of job records and their logs
#[async_trait]
pub trait JobDirectory: Send + Sync {
    /// Fetches every job record, in directory order
    async fn list_jobs(&self) -> Result<Vec<JobRecord>>;

    /// Uploads an archive as a new batch
    ///
    /// # Arguments
    /// * `batch_name` - Name of the new batch
    /// * `archive` - The archive to process
    async fn create_job(&self, batch_name: &str, archive: &ArchiveFile)
    -> Result<CreateJobResponse>;

    /// Deletes a batch and its derived files
    ///
    /// # Arguments
    /// * `batch_name` - The batch to delete
    async fn delete_job(&self, batch_name: &str) -> Result<DeleteJobResponse>;

    /// Reads the accumulated log lines of a batch
    ///
    /// # Arguments
    /// * `batch_name` - The batch whose logs to read
    async fn fetch_logs(&self, batch_name: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl JobDirectory for JobDirectoryClient {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        JobDirectoryClient::list_jobs(self).await
    }

    async fn create_job(
        &self,
        batch_name: &str,
        archive: &ArchiveFile,
    ) -> Result<CreateJobResponse> {
        JobDirectoryClient::create_job(self, batch_name, archive).await
    }

    async fn delete_job(&self, batch_name: &str) -> Result<DeleteJobResponse> {
        JobDirectoryClient::delete_job(self, batch_name).await
    }

    async fn fetch_logs(&self, batch_name: &str) -> Result<Vec<String>> {
        JobDirectoryClient::fetch_logs(self, batch_name).await
    }
}
