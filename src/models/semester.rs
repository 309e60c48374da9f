//! Semester model.
//!
//! A semester is a backend-owned academic period. Existing semesters are
//! read-only inputs to the scheduling checks; a [`SemesterDraft`] is what the
//! creation form submits before the backend assigns an id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateRange;

/// An existing semester.
///
/// Dates are inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Display name (e.g., "Fall 2024").
    pub name: String,
    /// First day of the semester.
    pub start_date: NaiveDate,
    /// Last day of the semester.
    pub end_date: NaiveDate,
    /// Registration window opening day.
    #[serde(default)]
    pub registration_start: Option<NaiveDate>,
    /// Registration window closing day.
    #[serde(default)]
    pub registration_end: Option<NaiveDate>,
}

impl Semester {
    /// Creates a semester spanning `[start_date, end_date]`.
    pub fn new(id: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id,
            name: String::new(),
            start_date,
            end_date,
            registration_start: None,
            registration_end: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the registration window.
    pub fn with_registration(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.registration_start = Some(start);
        self.registration_end = Some(end);
        self
    }

    /// The semester's date span.
    #[inline]
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// A semester submitted for creation.
///
/// Every date is optional so that a half-filled form can still be checked
/// and reported as [`MissingDates`](crate::validation::ValidationErrorKind::MissingDates).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDraft {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Proposed first day.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Proposed last day.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Proposed registration opening day.
    #[serde(default)]
    pub registration_start: Option<NaiveDate>,
    /// Proposed registration closing day.
    #[serde(default)]
    pub registration_end: Option<NaiveDate>,
}

impl SemesterDraft {
    /// Creates a draft spanning `[start_date, end_date]`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the registration window.
    pub fn with_registration(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.registration_start = Some(start);
        self.registration_end = Some(end);
        self
    }

    /// The proposed span, if both dates are present.
    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date?, self.end_date?))
    }

    /// Promotes the draft to a semester once the backend has assigned an id.
    ///
    /// Returns `None` while either date is missing.
    pub fn into_semester(self, id: i64) -> Option<Semester> {
        let range = self.range()?;
        Some(Semester {
            id,
            name: self.name,
            start_date: range.start,
            end_date: range.end,
            registration_start: self.registration_start,
            registration_end: self.registration_end,
        })
    }
}
