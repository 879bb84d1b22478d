//! Inpatient roster DTOs.
//!
//! Admission and doctor fields reuse the hospital information system's column
//! names (`no_rawat`, `kd_dokter`, ...). `cppt_summary` is specific to this
//! API and has the shape `{total, done, pending, new, percentage}`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AdmissionView, DoctorProfile, DocumentationStatus, RosterSummary, RosterView};

#[derive(Debug, Deserialize)]
pub(super) struct RosterParams {
    pub(super) filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdmissionPath {
    pub(super) no_rawat: String,
}

/// One active admission with its documentation status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdmissionResponse {
    #[schema(example = "2026/02/27/000009")]
    pub no_rawat: String,
    pub no_rkm_medis: String,
    pub nm_pasien: String,
    /// Payer label, `N/A` when unknown.
    pub penanggung_jawab: String,
    pub kd_kamar: String,
    pub nm_bangsal: String,
    pub diagnosa_awal: String,
    #[schema(value_type = String, example = "2026-02-27T08:30:00")]
    pub tgl_masuk: NaiveDateTime,
    /// `new`, `done` or `pending`.
    #[schema(value_type = String, example = "pending")]
    pub status_cppt: DocumentationStatus,
    /// Whether the doctor has written a note today.
    pub cppt_hari_ini: bool,
    pub jumlah_cppt_hari_ini: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub cppt_terakhir: Option<NaiveDateTime>,
}

impl From<AdmissionView> for AdmissionResponse {
    fn from(value: AdmissionView) -> Self {
        let AdmissionView { record, status } = value;
        Self {
            no_rawat: record.admission_no,
            no_rkm_medis: record.medical_record_no,
            nm_pasien: record.patient_name,
            penanggung_jawab: record.payer,
            kd_kamar: record.room_code,
            nm_bangsal: record.ward_name,
            diagnosa_awal: record.initial_diagnosis,
            tgl_masuk: record.admitted_at,
            status_cppt: status,
            cppt_hari_ini: record.notes_today > 0,
            jumlah_cppt_hari_ini: record.notes_today,
            cppt_terakhir: record.last_note_at,
        }
    }
}

/// Doctor header shown above the roster.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorInfoResponse {
    pub kd_dokter: String,
    pub nm_dokter: String,
    pub no_telp: String,
    /// Date the roster was computed for.
    #[schema(value_type = String, example = "2026-02-27")]
    pub tanggal_list: NaiveDate,
}

/// Documentation progress over the unfiltered roster.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
    pub new: usize,
    /// `done / (done + pending) * 100`, one decimal place.
    #[schema(example = 50.0)]
    pub percentage: f64,
}

impl From<RosterSummary> for SummaryResponse {
    fn from(value: RosterSummary) -> Self {
        Self {
            total: value.total,
            done: value.done,
            pending: value.pending,
            new: value.new,
            percentage: value.percentage,
        }
    }
}

/// Response payload for `GET /api/v1/ranap/pasien`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RosterResponse {
    /// Number of rows in `data`, after filtering.
    pub total: usize,
    pub data: Vec<AdmissionResponse>,
    pub dokter_info: DoctorInfoResponse,
    pub cppt_summary: SummaryResponse,
}

impl From<RosterView> for RosterResponse {
    fn from(value: RosterView) -> Self {
        let RosterView {
            doctor,
            date,
            admissions,
            summary,
        } = value;
        let data: Vec<AdmissionResponse> =
            admissions.into_iter().map(AdmissionResponse::from).collect();
        Self {
            total: data.len(),
            data,
            dokter_info: DoctorInfoResponse {
                kd_dokter: doctor.code.to_string(),
                nm_dokter: doctor.name,
                no_telp: doctor.phone,
                tanggal_list: date,
            },
            cppt_summary: SummaryResponse::from(summary),
        }
    }
}

/// Response payload for `GET /api/v1/ranap/profile`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorProfileResponse {
    pub kd_dokter: String,
    pub nm_dokter: String,
    pub no_telp: String,
    pub spesialisasi: String,
}

impl From<DoctorProfile> for DoctorProfileResponse {
    fn from(value: DoctorProfile) -> Self {
        Self {
            kd_dokter: value.code.to_string(),
            nm_dokter: value.name,
            no_telp: value.phone,
            spesialisasi: value.specialty,
        }
    }
}
