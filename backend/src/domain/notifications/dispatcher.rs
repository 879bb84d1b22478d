//! Notification dispatch loop.
//!
//! On every tick the dispatcher takes a batch of the oldest pending queue
//! entries and forwards them one at a time to the push provider. Each entry
//! gets exactly one attempt per tick and its outcome is written back. Queue
//! errors are logged and the loop carries on with the next tick.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::{DELIVERED_NOTE, PushMessage, QueuedNotification};
use crate::domain::ports::{NotificationQueueRepository, PushNotificationSender};

/// Polling cadence and batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDispatcherConfig {
    pub interval: Duration,
    pub batch_size: u32,
}

impl Default for NotificationDispatcherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            batch_size: 10,
        }
    }
}

/// Driven ports used by the dispatcher.
#[derive(Clone)]
pub struct NotificationDispatcherPorts {
    pub queue: Arc<dyn NotificationQueueRepository>,
    pub sender: Arc<dyn PushNotificationSender>,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub fetched: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Long-running consumer of the notification queue.
pub struct NotificationDispatcher {
    queue: Arc<dyn NotificationQueueRepository>,
    sender: Arc<dyn PushNotificationSender>,
    clock: Arc<dyn Clock>,
    config: NotificationDispatcherConfig,
}

impl NotificationDispatcher {
    /// Create a dispatcher; nothing runs until [`Self::run`] is awaited.
    pub fn new(
        ports: NotificationDispatcherPorts,
        clock: Arc<dyn Clock>,
        config: NotificationDispatcherConfig,
    ) -> Self {
        Self {
            queue: ports.queue,
            sender: ports.sender,
            clock,
            config,
        }
    }

    /// Poll forever. Missed ticks are delayed rather than bunched up.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_ms = self.config.interval.as_millis(),
            batch_size = self.config.batch_size,
            "notification dispatcher started"
        );
        loop {
            ticker.tick().await;
            let report = self.run_tick().await;
            if report.fetched > 0 {
                info!(
                    fetched = report.fetched,
                    sent = report.sent,
                    failed = report.failed,
                    "notification batch dispatched"
                );
            }
        }
    }

    /// Dispatch one batch.
    pub async fn run_tick(&self) -> DispatchReport {
        let batch = match self.queue.fetch_pending(self.config.batch_size).await {
            Ok(batch) => batch,
            Err(err) => {
                warn!(error = %err, "failed to fetch pending notifications");
                return DispatchReport::default();
            }
        };

        let mut report = DispatchReport {
            fetched: batch.len(),
            ..DispatchReport::default()
        };
        for entry in &batch {
            if self.dispatch_one(entry).await {
                report.sent += 1;
            } else {
                report.failed += 1;
            }
        }
        report
    }

    /// Send one entry and record the outcome. Returns whether it was sent.
    async fn dispatch_one(&self, entry: &QueuedNotification) -> bool {
        let message = PushMessage::from(entry);
        match self.sender.send(&message).await {
            Ok(()) => {
                if let Err(err) = self
                    .queue
                    .mark_sent(entry.id, DELIVERED_NOTE, self.clock.utc())
                    .await
                {
                    error!(id = entry.id, error = %err, "failed to mark notification sent");
                }
                true
            }
            Err(delivery) => {
                let detail = delivery.to_string();
                warn!(id = entry.id, kd_dokter = %entry.doctor_code, error = %detail, "push delivery failed");
                if let Err(err) = self.queue.mark_failed(entry.id, &detail).await {
                    error!(id = entry.id, error = %err, "failed to mark notification failed");
                }
                false
            }
        }
    }
}
