//! Dashboard configuration
//!
//! Defines the connection settings for the job directory and the intervals
//! the dashboard works with.

use std::path::PathBuf;
use std::time::Duration;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Job directory base URL (e.g., "http://localhost:5000")
    pub directory_url: String,

    /// How often to refresh the job list
    pub poll_interval: Duration,

    /// Upper bound for any single request to the directory
    pub request_timeout: Duration,

    /// Where downloaded job logs are written
    pub download_dir: PathBuf,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(directory_url: String) -> Self {
        Self {
            directory_url,
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            download_dir: PathBuf::from("."),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.directory_url.is_empty() {
            anyhow::bail!("directory_url cannot be empty");
        }

        if !self.directory_url.starts_with("http://") && !self.directory_url.starts_with("https://")
        {
            anyhow::bail!("directory_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000".to_string())
    }
}
