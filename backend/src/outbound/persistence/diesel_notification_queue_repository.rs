//! MySQL-backed notification queue.
//!
//! `sent_at` is stored as hospital-local wall time, like every other
//! timestamp in the schema.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::QueuedNotification;
use crate::domain::ports::{NotificationQueueError, NotificationQueueRepository};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::QueuedNotificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::notification_queue;

const STATUS_PENDING: &str = "pending";
const STATUS_SENT: &str = "sent";
const STATUS_FAILED: &str = "failed";

#[derive(Clone)]
pub struct DieselNotificationQueueRepository {
    pool: DbPool,
}

impl DieselNotificationQueueRepository {
    /// Create a repository over the queue tables.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> NotificationQueueError {
    map_pool_error(error, NotificationQueueError::connection)
}

fn map_diesel(error: diesel::result::Error) -> NotificationQueueError {
    map_diesel_error(
        error,
        NotificationQueueError::query,
        NotificationQueueError::connection,
    )
}

impl From<QueuedNotificationRow> for QueuedNotification {
    fn from(row: QueuedNotificationRow) -> Self {
        Self {
            id: row.id,
            doctor_code: row.kd_dokter,
            title: row.title,
            body: row.body,
            admission_no: row.no_rawat,
        }
    }
}

#[async_trait]
impl NotificationQueueRepository for DieselNotificationQueueRepository {
    async fn fetch_pending(
        &self,
        limit: u32,
    ) -> Result<Vec<QueuedNotification>, NotificationQueueError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<QueuedNotificationRow> = notification_queue::table
            .filter(notification_queue::status.eq(STATUS_PENDING))
            .order((
                notification_queue::created_at.asc(),
                notification_queue::id.asc(),
            ))
            .limit(i64::from(limit))
            .select(QueuedNotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(QueuedNotification::from).collect())
    }

    async fn mark_sent(
        &self,
        id: i64,
        note: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<(), NotificationQueueError> {
        let local = sent_at.with_timezone(&Local).naive_local();
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::update(notification_queue::table.find(id))
            .set((
                notification_queue::status.eq(STATUS_SENT),
                notification_queue::error_message.eq(Some(note)),
                notification_queue::sent_at.eq(Some(local)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }

    async fn mark_failed(&self, id: i64, message: &str) -> Result<(), NotificationQueueError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::update(notification_queue::table.find(id))
            .set((
                notification_queue::status.eq(STATUS_FAILED),
                notification_queue::error_message.eq(Some(message)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }
}
