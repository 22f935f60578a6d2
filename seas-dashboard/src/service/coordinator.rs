//! Action coordinator
//!
//! Runs the operator's actions (submit, delete, fetch logs, download) as
//! independent units of work. None of them share a lock with each other or
//! with the poller; each handles its own failure and reports it to the
//! operator, leaving unrelated state untouched.
//!
//! Whether a job may be deleted or downloaded is decided by the view through
//! the lifecycle gate. The coordinator does not check it again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::repository::JobDirectory;
use crate::scheduler::refresh_snapshot;
use crate::service::Interaction;
use crate::state::DashboardStore;

const MISSING_DRAFT: &str = "Please select a file and enter a batch name.";

/// How an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The directory accepted the request
    Completed,
    /// The request failed; the operator has been told why
    Failed,
    /// Nothing was sent
    Aborted,
}

/// Executes operator actions against the job directory
#[derive(Clone)]
pub struct ActionCoordinator {
    directory: Arc<dyn JobDirectory>,
    store: Arc<DashboardStore>,
    interaction: Arc<dyn Interaction>,
    download_dir: PathBuf,
}

impl ActionCoordinator {
    /// Creates a new coordinator
    ///
    /// # Arguments
    /// * `directory` - Where requests go
    /// * `store` - State the results are folded into
    /// * `interaction` - How the operator is asked and told
    /// * `download_dir` - Where downloaded logs are written
    pub fn new(
        directory: Arc<dyn JobDirectory>,
        store: Arc<DashboardStore>,
        interaction: Arc<dyn Interaction>,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            directory,
            store,
            interaction,
            download_dir,
        }
    }

    // =============================================================================
    // Submit
    // =============================================================================

    /// Submits the upload draft as a new batch
    ///
    /// The draft is cleared only when the directory accepts it, so a failed
    /// upload can be retried without re-entering anything.
    pub async fn submit(&self) -> ActionOutcome {
        let Some((batch_name, archive)) = self.store.draft().ready() else {
            self.interaction.notify(MISSING_DRAFT);
            return ActionOutcome::Aborted;
        };

        let _uploading = self.store.begin_upload();

        info!("Submitting batch {} ({})", batch_name, archive.file_name);

        match self.directory.create_job(&batch_name, &archive).await {
            Ok(_) => {
                info!("Batch {} accepted", batch_name);
                refresh_snapshot(self.directory.as_ref(), &self.store).await;
                self.store.clear_draft();
                ActionOutcome::Completed
            }
            Err(e) => {
                if e.is_rejected() {
                    warn!("Directory refused batch {}: {}", batch_name, e);
                } else {
                    error!("Failed to submit batch {}: {}", batch_name, e);
                }
                self.interaction.notify(&format!("Upload failed: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    // =============================================================================
    // Delete
    // =============================================================================

    /// Deletes a batch after the operator confirms
    pub async fn delete(&self, batch_name: &str) -> ActionOutcome {
        let prompt = format!("Are you sure you want to delete job \"{}\"?", batch_name);
        if !self.interaction.confirm(&prompt).await {
            debug!("Deletion of {} declined", batch_name);
            return ActionOutcome::Aborted;
        }

        info!("Deleting batch {}", batch_name);

        match self.directory.delete_job(batch_name).await {
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| "Deleted".to_string());
                self.interaction.notify(&message);
                refresh_snapshot(self.directory.as_ref(), &self.store).await;
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!("Failed to delete batch {}: {}", batch_name, e);
                self.interaction
                    .notify(&format!("Failed to delete job: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    // =============================================================================
    // Logs
    // =============================================================================

    /// Opens the log console on a batch
    ///
    /// Replaces whatever the console showed. If the operator closes the
    /// console before the response arrives, the response is dropped.
    pub async fn fetch_log(&self, batch_name: &str) -> ActionOutcome {
        let ticket = self.store.log_ticket();

        match self.directory.fetch_logs(batch_name).await {
            Ok(lines) => {
                debug!("Received {} log line(s) for {}", lines.len(), batch_name);
                if !self.store.show_logs(ticket, batch_name, lines.join("\n")) {
                    debug!("Console closed meanwhile, discarding logs for {}", batch_name);
                }
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!("Failed to fetch logs for {}: {}", batch_name, e);
                self.interaction
                    .notify(&format!("Failed to fetch logs: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    /// Saves a batch's logs to `<download_dir>/<batch>.log`
    ///
    /// Read-only on the directory side: the job itself is left in place.
    pub async fn download(&self, batch_name: &str) -> ActionOutcome {
        let path = download_path(&self.download_dir, batch_name);

        let result: anyhow::Result<()> = async {
            let lines = self.directory.fetch_logs(batch_name).await?;
            let mut content = lines.join("\n");
            content.push('\n');
            tokio::fs::write(&path, content)
                .await
                .map_err(|e| anyhow::anyhow!("cannot write {}: {}", path.display(), e))
        }
        .await;

        match result {
            Ok(()) => {
                info!("Saved logs for {} to {}", batch_name, path.display());
                self.interaction.notify(&format!(
                    "Saved logs for {} to {}",
                    batch_name,
                    path.display()
                ));
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!("Failed to download {}: {}", batch_name, e);
                self.interaction.notify(&format!("Download failed: {}", e));
                ActionOutcome::Failed
            }
        }
    }
}

/// Local file a batch's logs are downloaded to
///
/// Bytes outside `[A-Za-z0-9._-]` are written as `%XX`, so the name cannot
/// leave `dir` and two batch names never share a file.
fn download_path(dir: &Path, batch_name: &str) -> PathBuf {
    let mut safe = String::with_capacity(batch_name.len());
    for byte in batch_name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            safe.push(char::from(byte));
        } else {
            safe.push_str(&format!("%{:02X}", byte));
        }
    }
    dir.join(format!("{}.log", safe))
}
