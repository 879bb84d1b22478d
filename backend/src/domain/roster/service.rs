//! Roster service implementing the roster driving port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::debug;

use super::{AdmissionView, RosterSummary, RosterView, StatusFilter, sort_roster};
use crate::domain::ports::{AdmissionRepository, DoctorRepository, RosterQuery};
use crate::domain::{DoctorIdentity, DoctorProfile, Error};

/// Reads, classifies and summarises a doctor's roster.
///
/// "Today" is the local calendar date of the injected clock.
#[derive(Clone)]
pub struct RosterService {
    admissions: Arc<dyn AdmissionRepository>,
    doctors: Arc<dyn DoctorRepository>,
    clock: Arc<dyn Clock>,
}

impl RosterService {
    /// Create the roster service. `clock` decides what "today" is in local time.
    pub fn new(
        admissions: Arc<dyn AdmissionRepository>,
        doctors: Arc<dyn DoctorRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            admissions,
            doctors,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Profile for the roster header, falling back to the token identity when
    /// the doctor row is gone.
    async fn header_profile(&self, doctor: &DoctorIdentity) -> Result<DoctorProfile, Error> {
        let profile = self.doctors.find_profile(&doctor.code).await?;
        Ok(profile.unwrap_or_else(|| DoctorProfile {
            code: doctor.code.clone(),
            name: doctor.name.clone(),
            phone: String::new(),
            specialty: String::new(),
        }))
    }
}

#[async_trait]
impl RosterQuery for RosterService {
    async fn roster(
        &self,
        doctor: &DoctorIdentity,
        filter: StatusFilter,
    ) -> Result<RosterView, Error> {
        let today = self.today();
        let records = self.admissions.active_for_doctor(&doctor.code, today).await?;

        let mut views: Vec<AdmissionView> = records
            .into_iter()
            .map(|record| AdmissionView::classify(record, today))
            .collect();
        sort_roster(&mut views);
        let summary = RosterSummary::from_views(&views);
        views.retain(|view| filter.matches(view.status));

        debug!(
            kd_dokter = %doctor.code,
            total = summary.total,
            shown = views.len(),
            "roster assembled"
        );

        Ok(RosterView {
            doctor: self.header_profile(doctor).await?,
            date: today,
            admissions: views,
            summary,
        })
    }

    async fn admission(
        &self,
        doctor: &DoctorIdentity,
        admission_no: &str,
    ) -> Result<AdmissionView, Error> {
        let today = self.today();
        let record = self
            .admissions
            .find_for_doctor(&doctor.code, admission_no, today)
            .await?
            .ok_or_else(|| Error::not_found("patient not found"))?;
        Ok(AdmissionView::classify(record, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        AdmissionRepositoryError, MockAdmissionRepository, MockDoctorRepository,
    };
    use crate::domain::{AdmissionRecord, DoctorCode, DocumentationStatus, ErrorCode};
    use crate::test_support::MutableClock;
    use chrono::{Days, NaiveDateTime, NaiveTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 15, 0)
            .single()
            .expect("valid time");
        Arc::new(MutableClock::new(now))
    }

    fn doctor() -> DoctorIdentity {
        DoctorIdentity {
            code: DoctorCode::new("D01").expect("doctor code"),
            name: "dr. Sari Wulandari, Sp.PD".to_owned(),
        }
    }

    fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"))
    }

    fn record(no: &str, ward: &str, room: &str, admitted_at: NaiveDateTime, notes: u32) -> AdmissionRecord {
        AdmissionRecord {
            admission_no: no.to_owned(),
            medical_record_no: format!("RM-{no}"),
            patient_name: format!("Pasien {no}"),
            payer: "BPJS".to_owned(),
            room_code: room.to_owned(),
            ward_name: ward.to_owned(),
            initial_diagnosis: "Observasi febris".to_owned(),
            admitted_at,
            notes_today: notes,
            last_note_at: None,
        }
    }

    /// Three admissions for D01: A admitted today, B documented today, C not
    /// documented today.
    fn d01_records(today: NaiveDate) -> Vec<AdmissionRecord> {
        let earlier = today.checked_sub_days(Days::new(3)).expect("date");
        vec![
            record("2026/03/02/000001", "Melati", "M-01", at(today, 6), 0),
            record("2026/02/27/000014", "Melati", "M-02", at(earlier, 10), 1),
            record("2026/02/27/000009", "Anggrek", "A-03", at(earlier, 8), 0),
        ]
    }

    fn service(
        clock: Arc<MutableClock>,
        records: Vec<AdmissionRecord>,
    ) -> RosterService {
        let mut admissions = MockAdmissionRepository::new();
        let today = clock.local().date_naive();
        admissions
            .expect_active_for_doctor()
            .withf(move |code, day| code.as_str() == "D01" && *day == today)
            .returning(move |_, _| Ok(records.clone()));
        let mut doctors = MockDoctorRepository::new();
        doctors.expect_find_profile().returning(|code| {
            Ok(Some(DoctorProfile {
                code: code.clone(),
                name: "dr. Sari Wulandari, Sp.PD".to_owned(),
                phone: "0812000111".to_owned(),
                specialty: "Penyakit Dalam".to_owned(),
            }))
        });
        RosterService::new(Arc::new(admissions), Arc::new(doctors), clock)
    }

    #[rstest]
    #[tokio::test]
    async fn d01_roster_is_classified_ordered_and_summarised(clock: Arc<MutableClock>) {
        let today = clock.local().date_naive();
        let service = service(clock, d01_records(today));

        let view = service
            .roster(&doctor(), StatusFilter::All)
            .await
            .expect("roster");

        let statuses: Vec<(&str, DocumentationStatus)> = view
            .admissions
            .iter()
            .map(|v| (v.record.admission_no.as_str(), v.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("2026/02/27/000009", DocumentationStatus::Pending),
                ("2026/03/02/000001", DocumentationStatus::New),
                ("2026/02/27/000014", DocumentationStatus::Done),
            ]
        );
        assert_eq!(
            view.summary,
            RosterSummary {
                total: 3,
                done: 1,
                pending: 1,
                new: 1,
                percentage: 50.0,
            }
        );
        assert_eq!(view.date, today);
        assert_eq!(view.doctor.phone, "0812000111");
    }

    #[rstest]
    #[case(StatusFilter::Only(DocumentationStatus::Done), vec!["2026/02/27/000014"])]
    #[case(StatusFilter::Only(DocumentationStatus::Pending), vec!["2026/02/27/000009"])]
    #[case(StatusFilter::Only(DocumentationStatus::New), vec!["2026/03/02/000001"])]
    #[tokio::test]
    async fn filtering_keeps_the_unfiltered_summary(
        clock: Arc<MutableClock>,
        #[case] filter: StatusFilter,
        #[case] expected: Vec<&'static str>,
    ) {
        let today = clock.local().date_naive();
        let service = service(clock, d01_records(today));

        let view = service.roster(&doctor(), filter).await.expect("roster");

        let shown: Vec<&str> = view
            .admissions
            .iter()
            .map(|v| v.record.admission_no.as_str())
            .collect();
        assert_eq!(shown, expected);
        assert_eq!(view.summary.total, 3);
        assert_eq!(
            view.summary.done + view.summary.pending + view.summary.new,
            view.summary.total
        );
    }

    #[rstest]
    #[tokio::test]
    async fn ties_break_on_ward_room_then_admission_time(clock: Arc<MutableClock>) {
        let today = clock.local().date_naive();
        let earlier = today.checked_sub_days(Days::new(1)).expect("date");
        let records = vec![
            record("C", "Melati", "M-01", at(earlier, 9), 0),
            record("B", "Melati", "M-01", at(earlier, 7), 0),
            record("A", "Anggrek", "A-09", at(earlier, 11), 0),
        ];
        let service = service(clock, records);

        let view = service
            .roster(&doctor(), StatusFilter::All)
            .await
            .expect("roster");

        let order: Vec<&str> = view
            .admissions
            .iter()
            .map(|v| v.record.admission_no.as_str())
            .collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_roster_is_not_an_error(clock: Arc<MutableClock>) {
        let service = service(clock, Vec::new());
        let view = service
            .roster(&doctor(), StatusFilter::All)
            .await
            .expect("roster");
        assert!(view.admissions.is_empty());
        assert_eq!(view.summary, RosterSummary::default());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_doctor_row_falls_back_to_token_identity(clock: Arc<MutableClock>) {
        let mut admissions = MockAdmissionRepository::new();
        admissions
            .expect_active_for_doctor()
            .returning(|_, _| Ok(Vec::new()));
        let mut doctors = MockDoctorRepository::new();
        doctors.expect_find_profile().returning(|_| Ok(None));
        let service = RosterService::new(Arc::new(admissions), Arc::new(doctors), clock);

        let view = service
            .roster(&doctor(), StatusFilter::All)
            .await
            .expect("roster");
        assert_eq!(view.doctor.name, "dr. Sari Wulandari, Sp.PD");
        assert!(view.doctor.phone.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn query_failures_propagate(clock: Arc<MutableClock>) {
        let mut admissions = MockAdmissionRepository::new();
        admissions
            .expect_active_for_doctor()
            .returning(|_, _| Err(AdmissionRepositoryError::query("syntax error")));
        let doctors = MockDoctorRepository::new();
        let service = RosterService::new(Arc::new(admissions), Arc::new(doctors), clock);

        let err = service
            .roster(&doctor(), StatusFilter::All)
            .await
            .expect_err("query fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn detail_outside_the_roster_is_not_found(clock: Arc<MutableClock>) {
        let mut admissions = MockAdmissionRepository::new();
        admissions
            .expect_find_for_doctor()
            .withf(|code, no, _| code.as_str() == "D01" && no == "2026/02/27/000031")
            .returning(|_, _, _| Ok(None));
        let service = RosterService::new(
            Arc::new(admissions),
            Arc::new(MockDoctorRepository::new()),
            clock,
        );

        let err = service
            .admission(&doctor(), "2026/02/27/000031")
            .await
            .expect_err("foreign admission");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn detail_is_classified_against_today(clock: Arc<MutableClock>) {
        let today = clock.local().date_naive();
        let documented = d01_records(today).swap_remove(1);
        let mut admissions = MockAdmissionRepository::new();
        admissions
            .expect_find_for_doctor()
            .returning(move |_, _, _| Ok(Some(documented.clone())));
        let service = RosterService::new(
            Arc::new(admissions),
            Arc::new(MockDoctorRepository::new()),
            clock,
        );

        let view = service
            .admission(&doctor(), "2026/02/27/000014")
            .await
            .expect("detail");
        assert_eq!(view.status, DocumentationStatus::Done);
    }
}
