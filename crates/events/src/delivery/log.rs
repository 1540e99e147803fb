//! Transport that writes notifications to the log instead of sending them.

use async_trait::async_trait;

use super::{DispatchError, Transport};

/// Logs every message at INFO and reports success.
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DispatchError> {
        tracing::info!(to, subject, body_len = html.len(), "Notification (log transport)");
        Ok(())
    }
}
