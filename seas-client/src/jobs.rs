//! Job-related API endpoints

use reqwest::multipart::{Form, Part};
use seas_core::domain::job::JobRecord;
use seas_core::dto::job::{
    ArchiveFile, BATCH_NAME_FIELD, CreateJobResponse, DeleteJobResponse, FILE_FIELD, LogsResponse,
};
use tracing::debug;

use crate::JobDirectoryClient;
use crate::error::Result;

impl JobDirectoryClient {
    // =============================================================================
    // Job Listing
    // =============================================================================

    /// List all jobs known to the directory
    ///
    /// # Returns
    /// Every job record, in the order the directory reports them
    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        let url = self.endpoint(&["jobs"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Upload an archive as a new batch job
    ///
    /// # Arguments
    /// * `batch_name` - Name of the new batch
    /// * `archive` - The archive to process
    ///
    /// # Returns
    /// The directory's acknowledgement. A reply carrying an `error` field is
    /// turned into [`ClientError::Rejected`](crate::ClientError::Rejected).
    ///
    /// # Example
    /// ```no_run
    /// # use seas_client::{ArchiveFile, JobDirectoryClient};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = JobDirectoryClient::new("http://localhost:5000");
    /// let archive = ArchiveFile::new("scene.tar.gz", std::fs::read("scene.tar.gz")?);
    /// client.create_job("nightly", &archive).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_job(
        &self,
        batch_name: &str,
        archive: &ArchiveFile,
    ) -> Result<CreateJobResponse> {
        let url = self.endpoint(&["upload"])?;

        debug!(
            "Uploading {} ({} bytes) as batch {}",
            archive.file_name,
            archive.len(),
            batch_name
        );

        let form = Form::new()
            .part(
                FILE_FIELD,
                Part::bytes(archive.bytes.clone()).file_name(archive.file_name.clone()),
            )
            .text(BATCH_NAME_FIELD, batch_name.to_string());

        let response = self.client.post(url).multipart(form).send().await?;

        self.handle_response(response).await
    }

    /// Delete a batch job and everything the directory derived from it
    ///
    /// # Arguments
    /// * `batch_name` - The batch to delete
    pub async fn delete_job(&self, batch_name: &str) -> Result<DeleteJobResponse> {
        let url = self.endpoint(&["delete", batch_name])?;
        let response = self.client.delete(url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Logs
    // =============================================================================

    /// Get the accumulated log lines for a batch
    ///
    /// # Arguments
    /// * `batch_name` - The batch whose logs to read
    pub async fn fetch_logs(&self, batch_name: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&["logs", batch_name])?;
        let response = self.client.get(url).send().await?;

        let body: LogsResponse = self.handle_response(response).await?;
        Ok(body.logs)
    }
}
