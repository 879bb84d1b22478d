//! Inpatient roster: the active admissions a doctor is responsible for.
//!
//! Admissions are read with their same-day documentation counts, then
//! classified and summarised here. Classification is pure so that the
//! reference date can be supplied by an injected clock.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

mod service;
mod summary;

pub use service::RosterService;
pub use summary::RosterSummary;

use super::DoctorProfile;

/// Documentation state of an admission for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentationStatus {
    /// Admitted today; no note is expected yet.
    New,
    /// At least one note by the roster doctor today.
    Done,
    /// Admitted before today and not yet documented today.
    Pending,
}

impl DocumentationStatus {
    /// Classify an admission.
    ///
    /// Same-day admissions are always [`Self::New`], even when already
    /// documented.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use ward_rounds::domain::DocumentationStatus;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    /// let yesterday = today.pred_opt().unwrap();
    /// assert_eq!(DocumentationStatus::classify(today, 2, today), DocumentationStatus::New);
    /// assert_eq!(DocumentationStatus::classify(yesterday, 1, today), DocumentationStatus::Done);
    /// assert_eq!(DocumentationStatus::classify(yesterday, 0, today), DocumentationStatus::Pending);
    /// ```
    pub fn classify(admitted_on: NaiveDate, notes_today: u32, today: NaiveDate) -> Self {
        if admitted_on == today {
            Self::New
        } else if notes_today > 0 {
            Self::Done
        } else {
            Self::Pending
        }
    }

    /// Sort rank: pending first, then new, then done.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::New => 2,
            Self::Done => 3,
        }
    }

    /// Wire value used in `status_cppt`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Done => "done",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for DocumentationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster filter requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filter; also chosen for unrecognised values.
    #[default]
    All,
    /// Keep admissions with exactly this status.
    Only(DocumentationStatus),
}

impl StatusFilter {
    /// Parse a filter leniently; unknown values select everything.
    ///
    /// Besides `done`, `pending` and `new`, the legacy values `sudah_cppt`,
    /// `belum_cppt` and `pasien_baru` are accepted.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    /// Whether an admission with `status` passes the filter.
    pub fn matches(self, status: DocumentationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "done" | "sudah_cppt" => Ok(Self::Only(DocumentationStatus::Done)),
            "pending" | "belum_cppt" => Ok(Self::Only(DocumentationStatus::Pending)),
            "new" | "pasien_baru" => Ok(Self::Only(DocumentationStatus::New)),
            _ => Err(()),
        }
    }
}

/// Active admission as read from the hospital schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRecord {
    /// Admission number (`no_rawat`); may contain `/`.
    pub admission_no: String,
    pub medical_record_no: String,
    pub patient_name: String,
    /// Payer name, `N/A` when the admission has none.
    pub payer: String,
    pub room_code: String,
    pub ward_name: String,
    pub initial_diagnosis: String,
    pub admitted_at: NaiveDateTime,
    /// Notes written today by the roster doctor.
    pub notes_today: u32,
    /// Most recent note by the roster doctor, any day.
    pub last_note_at: Option<NaiveDateTime>,
}

impl AdmissionRecord {
    /// Calendar day of admission.
    pub fn admitted_on(&self) -> NaiveDate {
        self.admitted_at.date()
    }
}

/// Admission with its derived documentation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionView {
    pub record: AdmissionRecord,
    pub status: DocumentationStatus,
}

impl AdmissionView {
    /// Attach the documentation status `record` has on `today`.
    pub fn classify(record: AdmissionRecord, today: NaiveDate) -> Self {
        let status = DocumentationStatus::classify(record.admitted_on(), record.notes_today, today);
        Self { record, status }
    }

    fn sort_key(&self) -> (u8, &str, &str, NaiveDateTime) {
        (
            self.status.rank(),
            self.record.ward_name.as_str(),
            self.record.room_code.as_str(),
            self.record.admitted_at,
        )
    }
}

/// Sort admissions by status rank, ward, room, then admission time.
pub fn sort_roster(views: &mut [AdmissionView]) {
    views.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// A doctor's roster for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterView {
    pub doctor: DoctorProfile,
    /// Reference date used for classification.
    pub date: NaiveDate,
    /// Admissions after filtering, in roster order.
    pub admissions: Vec<AdmissionView>,
    /// Summary over the unfiltered roster.
    pub summary: RosterSummary,
}
