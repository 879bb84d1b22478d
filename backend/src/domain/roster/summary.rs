//! Count-and-percentage summary of a roster.

use super::{AdmissionView, DocumentationStatus};

/// Documentation progress over a doctor's full roster.
///
/// ## Invariants
/// - `done + pending + new == total`.
/// - `percentage` lies in `0.0..=100.0` and has one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RosterSummary {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
    pub new: usize,
    /// Share of documented admissions among those that need a note today.
    pub percentage: f64,
}

impl RosterSummary {
    /// Summarise `views`, which must be the unfiltered roster.
    pub fn from_views(views: &[AdmissionView]) -> Self {
        let mut summary = Self {
            total: views.len(),
            ..Self::default()
        };
        for view in views {
            match view.status {
                DocumentationStatus::Done => summary.done += 1,
                DocumentationStatus::Pending => summary.pending += 1,
                DocumentationStatus::New => summary.new += 1,
            }
        }
        summary.percentage = documented_percentage(summary.done, summary.pending);
        summary
    }
}

/// `done / (done + pending) * 100`, rounded to one decimal place.
///
/// New admissions are excluded from the denominator; an empty denominator
/// yields `0.0`.
fn documented_percentage(done: usize, pending: usize) -> f64 {
    let due = done + pending;
    if due == 0 {
        return 0.0;
    }
    let ratio = done as f64 / due as f64;
    (ratio * 1000.0).round() / 10.0
}
