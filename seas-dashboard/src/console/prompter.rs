//! Terminal operator interaction
//!
//! Confirmations share stdin with the command prompt. A pending question is
//! parked here and the console loop hands it the next line it reads.

use async_trait::async_trait;
use colored::Colorize;
use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::service::Interaction;

/// Operator sitting at this terminal
#[derive(Default)]
pub struct TerminalPrompter {
    pending: Mutex<Option<oneshot::Sender<String>>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands `line` to a waiting confirmation
    ///
    /// # Returns
    /// The line back if no confirmation was waiting for it
    pub async fn answer(&self, line: String) -> Option<String> {
        match self.pending.lock().await.take() {
            Some(reply) => reply.send(line).err(),
            None => Some(line),
        }
    }
}

#[async_trait]
impl Interaction for TerminalPrompter {
    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        if self.pending.lock().await.replace(reply).is_some() {
            debug!("Superseding an unanswered confirmation");
        }

        println!("{} {} {}", "?".yellow().bold(), prompt, "[y/N]".dimmed());

        match answer.await {
            Ok(line) => is_yes(&line),
            Err(_) => false,
        }
    }

    fn notify(&self, message: &str) {
        println!("{} {}", "»".cyan(), message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
