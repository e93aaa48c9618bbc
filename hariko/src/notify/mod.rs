//! Progress notifications
//!
//! A [`Notifier`] sends a message, or edits a previous one in place when given
//! its handle. Delivery is best-effort: failures are logged by the notifier
//! and surface to callers only as a missing handle.

pub mod discord;

use async_trait::async_trait;

use crate::models::notification::{Notification, ProgressHandle};

/// Sink for deployment progress messages
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `notification`, editing `previous` in place when present.
    ///
    /// Returns the handle of the sent or edited message, or `None` when
    /// nothing was delivered.
    async fn notify(
        &self,
        notification: &Notification,
        previous: Option<&ProgressHandle>,
    ) -> Option<ProgressHandle>;
}

/// Notifier used when no messaging sink is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(
        &self,
        _notification: &Notification,
        _previous: Option<&ProgressHandle>,
    ) -> Option<ProgressHandle> {
        None
    }
}
