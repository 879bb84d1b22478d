//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Rows read with
//! `sql_query` derive `QueryableByName` and name the SQL type of every
//! projected column explicitly.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Datetime, Nullable, Text, Varchar};

use super::schema::notification_queue;

/// Pending queue entry as read by the dispatcher.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notification_queue)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct QueuedNotificationRow {
    pub id: i64,
    pub kd_dokter: String,
    pub title: String,
    pub body: String,
    pub no_rawat: String,
}

/// Decrypted credential joined with its doctor.
///
/// `AES_DECRYPT` yields `NULL` when the key does not match, hence the
/// nullable columns.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct CredentialRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub id_user: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub password: Option<String>,
    #[diesel(sql_type = Varchar)]
    pub kd_dokter: String,
    #[diesel(sql_type = Varchar)]
    pub nm_dokter: String,
}

/// Roster projection of one active admission.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct AdmissionRow {
    #[diesel(sql_type = Varchar)]
    pub no_rawat: String,
    #[diesel(sql_type = Varchar)]
    pub no_rkm_medis: String,
    #[diesel(sql_type = Varchar)]
    pub nm_pasien: String,
    #[diesel(sql_type = Text)]
    pub penanggung_jawab: String,
    #[diesel(sql_type = Varchar)]
    pub kd_kamar: String,
    #[diesel(sql_type = Varchar)]
    pub nm_bangsal: String,
    #[diesel(sql_type = Nullable<Varchar>)]
    pub diagnosa_awal: Option<String>,
    #[diesel(sql_type = Datetime)]
    pub admitted_at: NaiveDateTime,
    #[diesel(sql_type = BigInt)]
    pub notes_today: i64,
    #[diesel(sql_type = Nullable<Datetime>)]
    pub last_note_at: Option<NaiveDateTime>,
}

/// Doctor profile with the specialty name resolved.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct DoctorProfileRow {
    #[diesel(sql_type = Varchar)]
    pub kd_dokter: String,
    #[diesel(sql_type = Varchar)]
    pub nm_dokter: String,
    #[diesel(sql_type = Nullable<Varchar>)]
    pub no_telp: Option<String>,
    #[diesel(sql_type = Text)]
    pub spesialisasi: String,
}
