//! Notification dispatch
//!
//! Handlers never deliver notifications inline: they enqueue a request on an
//! mpsc channel consumed by a background worker. Delivery failures are logged
//! and never roll back or fail the mutation that triggered them.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Delivery error
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Outbound notification capability.
///
/// The transport (SMTP relay, webhook, ...) is an external collaborator; the
/// server only depends on this contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// One queued outbound notification
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Handle for enqueueing notifications from request handlers
#[derive(Clone)]
pub struct NotifyService {
    tx: mpsc::Sender<NotificationRequest>,
}

impl NotifyService {
    /// Enqueue without blocking the request path. A full queue drops the
    /// notification with a warning; mutations never wait on delivery.
    pub fn enqueue(&self, request: NotificationRequest) {
        if let Err(e) = self.tx.try_send(request) {
            tracing::warn!("Notification queue full, dropping message: {e}");
        }
    }
}

/// Spawn the background delivery worker and return the enqueue handle
pub fn spawn_dispatcher(notifier: Arc<dyn Notifier>, buffer_size: usize) -> NotifyService {
    let (tx, rx) = mpsc::channel(buffer_size);
    tokio::spawn(run_worker(notifier, rx));
    NotifyService { tx }
}

async fn run_worker(notifier: Arc<dyn Notifier>, mut rx: mpsc::Receiver<NotificationRequest>) {
    tracing::info!("Notification worker started");

    while let Some(req) = rx.recv().await {
        match notifier.send(&req.recipient, &req.subject, &req.body).await {
            Ok(()) => {
                tracing::debug!(recipient = %req.recipient, subject = %req.subject, "Notification delivered");
            }
            Err(e) => {
                tracing::error!(recipient = %req.recipient, "Failed to deliver notification: {e}");
            }
        }
    }

    tracing::info!("Notification channel closed, worker stopping");
}

/// Default notifier: logs the rendered message instead of delivering it
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        tracing::info!(target: "notify", recipient, subject, "Outbound notification");
        tracing::debug!(target: "notify", body, "Notification body");
        Ok(())
    }
}
