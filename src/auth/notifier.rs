//! Delivery of reset tokens to account owners.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

#[async_trait]
pub trait ResetNotifier: Send + Sync {
    async fn notify(&self, email: &str, token: &str) -> Result<()>;
}

/// Writes the reset token to the log instead of sending mail.
#[derive(Clone, Debug, Default)]
pub struct LogResetNotifier;

#[async_trait]
impl ResetNotifier for LogResetNotifier {
    async fn notify(&self, email: &str, token: &str) -> Result<()> {
        info!(email, token, "Password reset token issued");
        Ok(())
    }
}
