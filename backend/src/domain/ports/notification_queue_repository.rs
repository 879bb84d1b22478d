//! Driven port for the pending-notification table.
//!
//! Entries are produced by other systems; the dispatch loop is the only
//! consumer and the only writer of delivery outcomes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::QueuedNotification;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification queue adapters.
    pub enum NotificationQueueError {
        /// Queue store connection could not be established.
        Connection { message: String } =>
            ServiceUnavailable: "notification queue connection failed: {message}",
        /// Read or update failed during execution.
        Query { message: String } =>
            InternalError: "notification queue query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQueueRepository: Send + Sync {
    /// Oldest `pending` entries first, at most `limit`.
    async fn fetch_pending(&self, limit: u32)
    -> Result<Vec<QueuedNotification>, NotificationQueueError>;

    /// Record a successful delivery.
    async fn mark_sent(
        &self,
        id: i64,
        note: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<(), NotificationQueueError>;

    /// Record a failed delivery with the error text.
    async fn mark_failed(&self, id: i64, message: &str) -> Result<(), NotificationQueueError>;
}
