//! Notification Module
//!
//! Fire-and-forget outbound notifications, decoupled from request handling
//! by a background dispatch worker.

pub mod dispatcher;
pub mod templates;

pub use dispatcher::{
    LogNotifier, NotificationRequest, Notifier, NotifyError, NotifyService, spawn_dispatcher,
};
