//! MySQL-backed doctor profile reads.

use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DoctorRepository, DoctorRepositoryError};
use crate::domain::{DoctorCode, DoctorProfile};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::DoctorProfileRow;
use super::pool::DbPool;

#[derive(Clone)]
pub struct DieselDoctorRepository {
    pool: DbPool,
}

impl DieselDoctorRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const FIND_PROFILE_SQL: &str = r"
SELECT
    d.kd_dokter,
    d.nm_dokter,
    d.no_telp,
    COALESCE(s.nm_sps, '') AS spesialisasi
FROM dokter d
LEFT JOIN spesialis s ON d.kd_sps = s.kd_sps
WHERE d.kd_dokter = ?
LIMIT 1
";

fn to_profile(row: DoctorProfileRow) -> Result<DoctorProfile, DoctorRepositoryError> {
    let code = DoctorCode::new(&row.kd_dokter)
        .map_err(|err| DoctorRepositoryError::query(format!("doctor row: {err}")))?;
    Ok(DoctorProfile {
        code,
        name: row.nm_dokter,
        phone: row.no_telp.unwrap_or_default(),
        specialty: row.spesialisasi,
    })
}

#[async_trait::async_trait]
impl DoctorRepository for DieselDoctorRepository {
    async fn find_profile(
        &self,
        code: &DoctorCode,
    ) -> Result<Option<DoctorProfile>, DoctorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DoctorRepositoryError::connection))?;
        let rows: Vec<DoctorProfileRow> = sql_query(FIND_PROFILE_SQL)
            .bind::<Text, _>(code.as_str())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    DoctorRepositoryError::query,
                    DoctorRepositoryError::connection,
                )
            })?;
        rows.into_iter().next().map(to_profile).transpose()
    }
}
