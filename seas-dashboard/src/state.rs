//! Dashboard state
//!
//! Everything the view renders lives here: the job snapshot, the log console,
//! the upload draft and the number of uploads in flight. Each piece sits in
//! its own watch channel so the view can wait for any of them to change, and
//! each has exactly one kind of writer:
//! - Snapshot: the poller and the submit/delete refreshes
//! - Log console: log fetches and the operator closing it
//! - Draft and upload count: the operator's edits and submissions
//!
//! Nothing here survives a restart; the job directory owns the durable truth.

use std::sync::Arc;

use seas_core::domain::job::JobRecord;
use seas_core::dto::job::ArchiveFile;
use tokio::sync::watch;

/// Point-in-time copy of every job, as of the last successful poll
///
/// Always replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    jobs: Vec<JobRecord>,
}

impl Snapshot {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    /// Jobs in the order the directory returned them
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    #[cfg(test)]
    pub fn find(&self, batch_name: &str) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| job.name == batch_name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Log console showing one batch's output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogView {
    pub batch_name: String,
    /// Log lines joined with `\n`
    pub content: String,
    pub visible: bool,
}

/// Batch waiting to be submitted
///
/// Survives failed submissions so the operator can retry as-is.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    pub batch_name: String,
    pub file: Option<Arc<ArchiveFile>>,
}

impl UploadDraft {
    /// Trimmed batch name and file, if the draft is ready to send
    pub fn ready(&self) -> Option<(String, Arc<ArchiveFile>)> {
        let name = self.batch_name.trim();
        match &self.file {
            Some(file) if !name.is_empty() => Some((name.to_string(), Arc::clone(file))),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.batch_name.is_empty() && self.file.is_none()
    }
}

/// Console state plus the number of times the operator has closed it
#[derive(Debug, Clone, Default)]
struct LogPanel {
    view: LogView,
    closes: u64,
}

/// Marks when a log fetch was issued, relative to console closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTicket(u64);

/// Shared, observable dashboard state
pub struct DashboardStore {
    snapshot: watch::Sender<Snapshot>,
    log_panel: watch::Sender<LogPanel>,
    draft: watch::Sender<UploadDraft>,
    uploads_in_flight: watch::Sender<usize>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self {
            snapshot: watch::Sender::new(Snapshot::default()),
            log_panel: watch::Sender::new(LogPanel::default()),
            draft: watch::Sender::new(UploadDraft::default()),
            uploads_in_flight: watch::Sender::new(0),
        }
    }

    // =============================================================================
    // Snapshot
    // =============================================================================

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Replaces the whole snapshot, dropping jobs absent from `snapshot`
    pub fn replace_snapshot(&self, snapshot: Snapshot) {
        self.snapshot.send_replace(snapshot);
    }

    // =============================================================================
    // Log console
    // =============================================================================

    pub fn log_view(&self) -> LogView {
        self.log_panel.borrow().view.clone()
    }

    /// Takes a ticket before issuing a log fetch
    pub fn log_ticket(&self) -> LogTicket {
        LogTicket(self.log_panel.borrow().closes)
    }

    /// Opens the console on `batch_name`, replacing whatever it showed
    ///
    /// Returns `false` and leaves the console alone when the operator closed
    /// it after `ticket` was taken.
    pub fn show_logs(&self, ticket: LogTicket, batch_name: &str, content: String) -> bool {
        self.log_panel.send_if_modified(|panel| {
            if panel.closes != ticket.0 {
                return false;
            }
            panel.view = LogView {
                batch_name: batch_name.to_string(),
                content,
                visible: true,
            };
            true
        })
    }

    pub fn close_log_view(&self) {
        self.log_panel.send_modify(|panel| {
            panel.view = LogView::default();
            panel.closes += 1;
        });
    }

    // =============================================================================
    // Upload draft
    // =============================================================================

    pub fn draft(&self) -> UploadDraft {
        self.draft.borrow().clone()
    }

    pub fn set_batch_name(&self, batch_name: impl Into<String>) {
        let batch_name = batch_name.into();
        self.draft.send_modify(|draft| draft.batch_name = batch_name);
    }

    pub fn select_file(&self, file: ArchiveFile) {
        let file = Arc::new(file);
        self.draft.send_modify(|draft| draft.file = Some(file));
    }

    pub fn clear_draft(&self) {
        self.draft.send_replace(UploadDraft::default());
    }

    // =============================================================================
    // Uploads in flight
    // =============================================================================

    pub fn is_uploading(&self) -> bool {
        *self.uploads_in_flight.borrow() > 0
    }

    /// Counts an upload as in flight until the guard is dropped
    pub fn begin_upload(&self) -> UploadGuard<'_> {
        self.uploads_in_flight.send_modify(|count| *count += 1);
        UploadGuard { store: self }
    }

    // =============================================================================
    // Observation
    // =============================================================================

    /// Subscribes to changes of any part of the state
    pub fn subscribe(&self) -> StoreWatcher {
        StoreWatcher {
            snapshot: self.snapshot.subscribe(),
            log_panel: self.log_panel.subscribe(),
            draft: self.draft.subscribe(),
            uploads_in_flight: self.uploads_in_flight.subscribe(),
        }
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps an upload counted as in flight; released on drop
///
/// Dropping covers success, failure, early return and cancellation alike.
pub struct UploadGuard<'a> {
    store: &'a DashboardStore,
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.store
            .uploads_in_flight
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

/// Waits for changes anywhere in a [`DashboardStore`]
pub struct StoreWatcher {
    snapshot: watch::Receiver<Snapshot>,
    log_panel: watch::Receiver<LogPanel>,
    draft: watch::Receiver<UploadDraft>,
    uploads_in_flight: watch::Receiver<usize>,
}

impl StoreWatcher {
    /// Resolves once any part of the state changes
    ///
    /// Returns `false` when the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            res = self.snapshot.changed() => res.is_ok(),
            res = self.log_panel.changed() => res.is_ok(),
            res = self.draft.changed() => res.is_ok(),
            res = self.uploads_in_flight.changed() => res.is_ok(),
        }
    }
}
