//! Interactive terminal console
//!
//! Wires the dashboard together: starts the poller, re-renders the view
//! whenever the state changes and turns typed commands into actions. Actions
//! run as their own tasks so the prompt stays responsive while requests are
//! in flight.

mod command;
mod prompter;

pub use command::ConsoleCommand;
pub use prompter::TerminalPrompter;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use seas_client::JobDirectoryClient;
use seas_core::dto::job::ArchiveFile;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::Config;
use crate::repository::JobDirectory;
use crate::scheduler::Poller;
use crate::service::{ActionCoordinator, Interaction};
use crate::state::DashboardStore;
use crate::view::{DashboardView, RowActions};

/// Runs the dashboard until the operator quits or stdin closes
pub async fn run(config: &Config) -> Result<()> {
    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let directory: Arc<dyn JobDirectory> = Arc::new(JobDirectoryClient::with_client(
        config.directory_url.clone(),
        http_client,
    ));

    info!("Job directory client initialized");

    let store = Arc::new(DashboardStore::new());
    let prompter = Arc::new(TerminalPrompter::new());
    let coordinator = ActionCoordinator::new(
        Arc::clone(&directory),
        Arc::clone(&store),
        prompter.clone(),
        config.download_dir.clone(),
    );

    let poller = Poller::new(directory, Arc::clone(&store), config.poll_interval).start();
    let renderer = spawn_renderer(Arc::clone(&store));

    println!("{}", "Type `help` for the list of commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let Some(line) = prompter.answer(line).await else {
            continue;
        };

        match ConsoleCommand::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(command)) => dispatch(command, &coordinator, &store, prompter.as_ref()).await,
            Err(usage) => print!("{}", usage),
        }
    }

    if !store.draft().is_empty() {
        info!("Discarding unsent upload draft");
    }
    info!("Shutting down dashboard");
    poller.stop();
    renderer.abort();

    Ok(())
}

/// Routes a console command to the store or the coordinator
async fn dispatch(
    command: ConsoleCommand,
    coordinator: &ActionCoordinator,
    store: &DashboardStore,
    interaction: &dyn Interaction,
) {
    match command {
        ConsoleCommand::Name { words } => store.set_batch_name(command::batch_name(&words)),
        ConsoleCommand::File { path } => match load_archive(&path).await {
            Ok(archive) => store.select_file(archive),
            Err(e) => interaction.notify(&format!("{:#}", e)),
        },
        ConsoleCommand::Upload => {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.submit().await });
        }
        ConsoleCommand::Logs { batch } => {
            let batch = command::batch_name(&batch);
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.fetch_log(&batch).await });
        }
        ConsoleCommand::Close => store.close_log_view(),
        ConsoleCommand::Delete { batch } => {
            let batch = command::batch_name(&batch);
            if let Err(reason) = check_gate(store, &batch, "Delete", |a| a.delete) {
                interaction.notify(&reason);
                return;
            }
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.delete(&batch).await });
        }
        ConsoleCommand::Download { batch } => {
            let batch = command::batch_name(&batch);
            if let Err(reason) = check_gate(store, &batch, "Download", |a| a.download) {
                interaction.notify(&reason);
                return;
            }
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.download(&batch).await });
        }
        ConsoleCommand::Show => println!("{}", DashboardView::from_store(store).render()),
        ConsoleCommand::Quit => {}
    }
}

/// Checks that the view currently enables an action on `batch`
fn check_gate(
    store: &DashboardStore,
    batch: &str,
    label: &str,
    enabled: impl Fn(&RowActions) -> bool,
) -> std::result::Result<(), String> {
    let view = DashboardView::from_store(store);
    match view.row(batch) {
        None => Err(format!("No job named \"{}\"", batch)),
        Some(row) if !enabled(&row.actions) => Err(format!(
            "{} is disabled for \"{}\" until it finishes (status: {})",
            label, batch, row.status
        )),
        Some(_) => Ok(()),
    }
}

/// Reads an archive selected by the operator
async fn load_archive(path: &Path) -> Result<ArchiveFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .with_context(|| format!("{} is not a file", path.display()))?;

    debug!("Loaded {} ({} bytes)", file_name, bytes.len());
    Ok(ArchiveFile::new(file_name, bytes))
}

/// Prints the dashboard whenever what it shows changes
fn spawn_renderer(store: Arc<DashboardStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut watcher = store.subscribe();
        let mut last: Option<DashboardView> = None;

        loop {
            let view = DashboardView::from_store(&store);
            if last.as_ref() != Some(&view) {
                println!("{}", view.render());
                last = Some(view);
            }

            if !watcher.changed().await {
                break;
            }
        }
    })
}
