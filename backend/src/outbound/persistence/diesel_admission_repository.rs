//! MySQL-backed roster reads over the hospital inpatient schema.
//!
//! One projection serves both the roster and the detail view. Note
//! aggregates only count entries written by the roster doctor (`nip`).

use chrono::NaiveDate;
use diesel::sql_query;
use diesel::sql_types::{Date, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AdmissionRepository, AdmissionRepositoryError};
use crate::domain::{AdmissionRecord, DoctorCode};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::AdmissionRow;
use super::pool::{DbPool, PoolError};

/// Diesel-backed implementation of [`AdmissionRepository`].
#[derive(Clone)]
pub struct DieselAdmissionRepository {
    pool: DbPool,
}

impl DieselAdmissionRepository {
    /// Create a repository reading admissions through `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// First bind is the reference date for the same-day note count; the second
// is the doctor code.
const ACTIVE_ADMISSIONS_SQL: &str = r"
SELECT
    ki.no_rawat,
    p.no_rkm_medis,
    p.nm_pasien,
    COALESCE(pj.png_jawab, 'N/A') AS penanggung_jawab,
    k.kd_kamar,
    b.nm_bangsal,
    ki.diagnosa_awal,
    TIMESTAMP(ki.tgl_masuk, ki.jam_masuk) AS admitted_at,
    CAST((
        SELECT COUNT(*) FROM pemeriksaan_ranap pr
        WHERE pr.no_rawat = ki.no_rawat
          AND pr.nip = dr.kd_dokter
          AND pr.tgl_perawatan = ?
    ) AS SIGNED) AS notes_today,
    (
        SELECT MAX(TIMESTAMP(pr.tgl_perawatan, pr.jam_rawat)) FROM pemeriksaan_ranap pr
        WHERE pr.no_rawat = ki.no_rawat
          AND pr.nip = dr.kd_dokter
    ) AS last_note_at
FROM kamar_inap ki
JOIN reg_periksa rp ON ki.no_rawat = rp.no_rawat
JOIN pasien p ON rp.no_rkm_medis = p.no_rkm_medis
JOIN dpjp_ranap dr ON ki.no_rawat = dr.no_rawat
JOIN kamar k ON ki.kd_kamar = k.kd_kamar
JOIN bangsal b ON k.kd_bangsal = b.kd_bangsal
LEFT JOIN penjab pj ON rp.kd_pj = pj.kd_pj
WHERE ki.stts_pulang = '-'
  AND dr.kd_dokter = ?
";

/// Roster projection narrowed to one admission.
fn detail_sql() -> String {
    format!("{ACTIVE_ADMISSIONS_SQL}  AND ki.no_rawat = ?\nLIMIT 1")
}

fn map_pool(error: PoolError) -> AdmissionRepositoryError {
    map_pool_error(error, AdmissionRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AdmissionRepositoryError {
    map_diesel_error(
        error,
        AdmissionRepositoryError::query,
        AdmissionRepositoryError::connection,
    )
}

fn to_record(row: AdmissionRow) -> Result<AdmissionRecord, AdmissionRepositoryError> {
    let notes_today = u32::try_from(row.notes_today).map_err(|_| {
        AdmissionRepositoryError::query(format!(
            "note count out of range for {}: {}",
            row.no_rawat, row.notes_today
        ))
    })?;
    Ok(AdmissionRecord {
        admission_no: row.no_rawat,
        medical_record_no: row.no_rkm_medis,
        patient_name: row.nm_pasien,
        payer: row.penanggung_jawab,
        room_code: row.kd_kamar,
        ward_name: row.nm_bangsal,
        initial_diagnosis: row.diagnosa_awal.unwrap_or_default(),
        admitted_at: row.admitted_at,
        notes_today,
        last_note_at: row.last_note_at,
    })
}

#[async_trait::async_trait]
impl AdmissionRepository for DieselAdmissionRepository {
    async fn active_for_doctor(
        &self,
        doctor: &DoctorCode,
        today: NaiveDate,
    ) -> Result<Vec<AdmissionRecord>, AdmissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<AdmissionRow> = sql_query(ACTIVE_ADMISSIONS_SQL)
            .bind::<Date, _>(today)
            .bind::<Text, _>(doctor.as_str())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter().map(to_record).collect()
    }

    async fn find_for_doctor(
        &self,
        doctor: &DoctorCode,
        admission_no: &str,
        today: NaiveDate,
    ) -> Result<Option<AdmissionRecord>, AdmissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<AdmissionRow> = sql_query(detail_sql())
            .bind::<Date, _>(today)
            .bind::<Text, _>(doctor.as_str())
            .bind::<Text, _>(admission_no)
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter().next().map(to_record).transpose()
    }
}
