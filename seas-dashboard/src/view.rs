//! Dashboard view
//!
//! A pure projection of the dashboard state. The view decides which row
//! actions are enabled; a row's download and delete controls are enabled
//! exactly when its status passes the lifecycle gate.

use colored::{ColoredString, Colorize};
use seas_core::domain::job::{STATUS_DONE, is_terminal};

use crate::state::{DashboardStore, LogView, Snapshot, UploadDraft};

/// Which controls a job row offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    pub console: bool,
    pub download: bool,
    pub delete: bool,
}

impl RowActions {
    pub fn for_status(status: &str) -> Self {
        let terminal = is_terminal(status);
        Self {
            console: true,
            download: terminal,
            delete: terminal,
        }
    }
}

/// One rendered job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub name: String,
    pub timestamp: String,
    pub status: String,
    pub actions: RowActions,
}

/// Everything the operator sees at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub rows: Vec<JobRow>,
    pub log_view: LogView,
    pub draft_batch_name: String,
    pub draft_file: Option<String>,
    pub uploading: bool,
}

impl DashboardView {
    pub fn build(
        snapshot: &Snapshot,
        log_view: &LogView,
        draft: &UploadDraft,
        uploading: bool,
    ) -> Self {
        let rows = snapshot
            .jobs()
            .iter()
            .map(|job| JobRow {
                name: job.name.clone(),
                timestamp: job.timestamp.clone(),
                status: job.status.clone(),
                actions: RowActions::for_status(&job.status),
            })
            .collect();

        Self {
            rows,
            log_view: log_view.clone(),
            draft_batch_name: draft.batch_name.clone(),
            draft_file: draft.file.as_ref().map(|f| f.file_name.clone()),
            uploading,
        }
    }

    pub fn from_store(store: &DashboardStore) -> Self {
        Self::build(
            &store.snapshot(),
            &store.log_view(),
            &store.draft(),
            store.is_uploading(),
        )
    }

    pub fn row(&self, batch_name: &str) -> Option<&JobRow> {
        self.rows.iter().find(|row| row.name == batch_name)
    }

    /// Renders the view as terminal text
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", "Seas Job Manager".bold()));
        out.push_str(&format!("{}\n", "─".repeat(80).dimmed()));

        // Upload card
        let name = if self.draft_batch_name.is_empty() {
            "(none)".dimmed()
        } else {
            self.draft_batch_name.cyan()
        };
        let file = match &self.draft_file {
            Some(file) => file.cyan(),
            None => "(none)".dimmed(),
        };
        out.push_str(&format!("  Batch name: {}\n", name));
        out.push_str(&format!("  File:       {}\n", file));
        if self.uploading {
            out.push_str(&format!("  {}\n", "Uploading...".yellow()));
        }
        out.push('\n');

        // Job table
        if self.rows.is_empty() {
            out.push_str(&format!("{}\n", "No jobs found.".yellow()));
        } else {
            out.push_str(&format!(
                "{}\n",
                format!("{:<24} {:<20} {:<28} {}", "Name", "Timestamp", "Status", "Actions")
                    .bold()
            ));
            for row in &self.rows {
                out.push_str(&format!(
                    "{:<24} {:<20} {} {} {} {}\n",
                    row.name,
                    row.timestamp.dimmed(),
                    colorize_status(&format!("{:<28}", row.status), &row.status),
                    action_label("logs", row.actions.console),
                    action_label("download", row.actions.download),
                    action_label("delete", row.actions.delete),
                ));
            }
        }

        // Log console
        if self.log_view.visible {
            out.push('\n');
            out.push_str(&format!(
                "{}\n",
                format!("Console Output: {}", self.log_view.batch_name).bold()
            ));
            out.push_str(&format!("{}\n", "─".repeat(80).dimmed()));
            if !self.log_view.content.is_empty() {
                out.push_str(&self.log_view.content);
                out.push('\n');
            }
            out.push_str(&format!("{}\n", "─".repeat(80).dimmed()));
        }

        out
    }
}

/// Colorizes a (possibly padded) status label by its meaning
fn colorize_status(label: &str, status: &str) -> ColoredString {
    if status == STATUS_DONE {
        label.green()
    } else if is_terminal(status) {
        label.red()
    } else {
        label.yellow()
    }
}

fn action_label(name: &str, enabled: bool) -> ColoredString {
    if enabled {
        format!("[{}]", name).cyan()
    } else {
        format!("[{}]", name).dimmed().strikethrough()
    }
}
