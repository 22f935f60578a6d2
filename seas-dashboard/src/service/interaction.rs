//! Operator interaction capability

use async_trait::async_trait;

/// Ways an action can reach the operator
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Asks a yes/no question; `true` means the operator agreed
    async fn confirm(&self, prompt: &str) -> bool;

    /// Shows a message the operator should see
    fn notify(&self, message: &str);
}
