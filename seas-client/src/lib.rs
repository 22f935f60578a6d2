//! Seas HTTP Client
//!
//! A small, type-safe HTTP client for the job directory that stores batch jobs
//! and their logs.
//!
//! # Example
//!
//! ```no_run
//! use seas_client::JobDirectoryClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobDirectoryClient::new("http://localhost:5000");
//!
//!     for job in client.list_jobs().await? {
//!         println!("{} {} {}", job.name, job.timestamp, job.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use seas_core::domain::job::JobRecord;
pub use seas_core::dto::job::ArchiveFile;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the job directory API
///
/// Covers the four endpoints the dashboard needs:
/// - Listing jobs
/// - Creating a job from an uploaded archive
/// - Deleting a job
/// - Fetching a job's accumulated logs
#[derive(Debug, Clone)]
pub struct JobDirectoryClient {
    /// Base URL of the directory (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobDirectoryClient {
    /// Create a new directory client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the directory (e.g., "http://localhost:5000")
    ///
    /// # Example
    /// ```
    /// use seas_client::JobDirectoryClient;
    ///
    /// let client = JobDirectoryClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new directory client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use seas_client::JobDirectoryClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobDirectoryClient::with_client("http://localhost:5000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the directory
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments
    ///
    /// Each segment is percent-encoded on its own, so a batch name can never
    /// escape into another path component.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "Base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// The directory may report failure through an `error` field with any
    /// status code, so the body is inspected before the status.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if let Some(message) = rejection_message(&body) {
            return Err(ClientError::rejected(status.as_u16(), message));
        }

        if !status.is_success() {
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Extract a non-empty `error` string from a JSON object body
fn rejection_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
