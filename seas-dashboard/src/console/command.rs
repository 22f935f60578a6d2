//! Console command parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(multicall = true)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

/// Commands the operator can type at the dashboard prompt
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ConsoleCommand {
    /// Set the batch name of the next upload
    Name {
        /// Batch name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Select the archive of the next upload
    File {
        /// Path to a .tar.gz archive
        path: PathBuf,
    },
    /// Submit the selected archive as a new batch
    Upload,
    /// Show a batch's console output
    Logs {
        /// Batch name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        batch: Vec<String>,
    },
    /// Close the console output
    Close,
    /// Delete a finished batch
    Delete {
        /// Batch name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        batch: Vec<String>,
    },
    /// Save a finished batch's logs to the download directory
    Download {
        /// Batch name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        batch: Vec<String>,
    },
    /// Print the dashboard again
    Show,
    /// Leave the dashboard
    #[command(alias = "exit")]
    Quit,
}

impl ConsoleCommand {
    /// Parses one input line
    ///
    /// # Returns
    /// `Ok(None)` for a blank line, or the rendered clap message (usage,
    /// help or error) when the line is not a command.
    pub fn parse_line(line: &str) -> Result<Option<Self>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }

        ConsoleLine::try_parse_from(words)
            .map(|parsed| Some(parsed.command))
            .map_err(|e| e.render().to_string())
    }
}

/// Joins the words of a batch name typed at the prompt
pub fn batch_name(words: &[String]) -> String {
    words.join(" ")
}
