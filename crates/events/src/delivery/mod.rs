//! Notification transports.
//!
//! The [`Dispatcher`](crate::dispatcher::Dispatcher) hands each queued
//! notification to a [`Transport`]. SMTP is used when configured; otherwise
//! messages are written to the log.

use std::sync::Arc;

use async_trait::async_trait;

pub mod email;
pub mod log;

use email::{EmailConfig, EmailError, EmailTransport};

/// Error type for a single failed delivery.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Email(#[from] EmailError),

    /// The recipient has no address on file.
    #[error("Recipient has no e-mail address")]
    MissingAddress,

    #[error("Delivery failed: {0}")]
    Other(String),
}

/// Sends one rendered notification to one recipient.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `html` with the given subject to `to`.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DispatchError>;
}

/// SMTP transport when `SMTP_HOST` is set, log transport otherwise.
pub fn transport_from_env() -> Result<Arc<dyn Transport>, EmailError> {
    match EmailConfig::from_env() {
        Some(config) => {
            tracing::info!(host = %config.smtp_host, port = config.smtp_port, "SMTP delivery enabled");
            Ok(Arc::new(EmailTransport::new(config)?))
        }
        None => {
            tracing::info!("SMTP_HOST not set, notifications will be logged");
            Ok(Arc::new(log::LogTransport))
        }
    }
}
