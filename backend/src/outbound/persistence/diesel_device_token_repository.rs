//! MySQL-backed push device token upsert.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use diesel::sql_query;
use diesel::sql_types::{Datetime, Nullable, Text, Varchar};
use diesel_async::RunQueryDsl;

use crate::domain::DeviceTokenRegistration;
use crate::domain::ports::{DeviceTokenRepository, DeviceTokenRepositoryError};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

#[derive(Clone)]
pub struct DieselDeviceTokenRepository {
    pool: DbPool,
}

impl DieselDeviceTokenRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// `token` carries a unique index, so a repeated registration refreshes the
// existing row instead of adding one.
const UPSERT_TOKEN_SQL: &str = r"
INSERT INTO fcm_tokens
    (token, user_id, kd_dokter, device_type, user_agent, platform, active, last_used, created_at)
VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
ON DUPLICATE KEY UPDATE
    user_id = VALUES(user_id),
    kd_dokter = VALUES(kd_dokter),
    device_type = VALUES(device_type),
    user_agent = VALUES(user_agent),
    platform = VALUES(platform),
    active = 1,
    last_used = VALUES(last_used),
    updated_at = VALUES(last_used)
";

#[async_trait]
impl DeviceTokenRepository for DieselDeviceTokenRepository {
    async fn upsert(
        &self,
        registration: &DeviceTokenRegistration,
        now: DateTime<Utc>,
    ) -> Result<(), DeviceTokenRepositoryError> {
        let local_now = now.with_timezone(&Local).naive_local();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DeviceTokenRepositoryError::connection))?;
        sql_query(UPSERT_TOKEN_SQL)
            .bind::<Varchar, _>(registration.token.as_str())
            .bind::<Nullable<Varchar>, _>(registration.user_id.as_deref())
            .bind::<Varchar, _>(registration.doctor_code.as_str())
            .bind::<Nullable<Varchar>, _>(registration.device_type.as_deref())
            .bind::<Nullable<Text>, _>(registration.user_agent.as_deref())
            .bind::<Nullable<Varchar>, _>(registration.platform.as_deref())
            .bind::<Datetime, _>(local_now)
            .bind::<Datetime, _>(local_now)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    DeviceTokenRepositoryError::query,
                    DeviceTokenRepositoryError::connection,
                )
            })?;
        Ok(())
    }
}
