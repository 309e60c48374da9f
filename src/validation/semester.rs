//! Semester date checks.
//!
//! Semesters must not share a single day. Ranges are closed on both ends,
//! so a semester that ends on day `d` blocks any new semester starting on
//! `d`; [`compute_min_start_date`] hands the form the first free day.

use chrono::{Days, NaiveDate};
use tracing::debug;

use super::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::models::{DateRange, Semester, SemesterDraft};

/// Latest `end_date` across all semesters.
///
/// Returns `None` for an empty list.
pub fn find_latest_end_date(semesters: &[Semester]) -> Option<NaiveDate> {
    semesters.iter().map(|s| s.end_date).max()
}

/// Earliest legal start date for a new semester: the latest end date plus
/// one day.
///
/// Returns `None` when there is no prior semester (no lower bound).
///
/// # Examples
///
/// ```
/// use capstone_schedule::models::Semester;
/// use capstone_schedule::validation::compute_min_start_date;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let semesters = vec![Semester::new(1, start, end)];
///
/// assert_eq!(
///     compute_min_start_date(&semesters),
///     NaiveDate::from_ymd_opt(2024, 7, 1)
/// );
/// assert_eq!(compute_min_start_date(&[]), None);
/// ```
pub fn compute_min_start_date(semesters: &[Semester]) -> Option<NaiveDate> {
    compute_min_start_date_with_gap(semesters, 1)
}

/// Like [`compute_min_start_date`], with a configurable gap in days.
///
/// Saturates at [`NaiveDate::MAX`] rather than dropping the bound.
pub fn compute_min_start_date_with_gap(semesters: &[Semester], gap_days: u32) -> Option<NaiveDate> {
    let latest = find_latest_end_date(semesters)?;
    Some(
        latest
            .checked_add_days(Days::new(u64::from(gap_days)))
            .unwrap_or(NaiveDate::MAX),
    )
}

/// Whether `[new_start, new_end]` shares a day with any existing semester.
///
/// Overlap is declared when `new_start` or `new_end` falls inside an
/// existing range (endpoints included), or when the new range covers an
/// existing one. The caller checks `new_start < new_end` beforehand.
pub fn check_date_overlap(existing: &[Semester], new_start: NaiveDate, new_end: NaiveDate) -> bool {
    find_overlapping(existing, &DateRange::new(new_start, new_end)).is_some()
}

fn find_overlapping<'a>(existing: &'a [Semester], candidate: &DateRange) -> Option<&'a Semester> {
    existing.iter().find(|s| candidate.overlaps(&s.range()))
}

/// First semester closer than `gap_days` to `candidate`, on either side.
///
/// A gap of `n` days means `n - 1` free days between two semesters, so a
/// gap of 1 is plain overlap.
fn find_too_close<'a>(
    existing: &'a [Semester],
    candidate: &DateRange,
    gap_days: u32,
) -> Option<&'a Semester> {
    let pad = Days::new(u64::from(gap_days.saturating_sub(1)));
    let padded = DateRange::new(
        candidate.start.checked_sub_days(pad).unwrap_or(NaiveDate::MIN),
        candidate.end.checked_add_days(pad).unwrap_or(NaiveDate::MAX),
    );
    find_overlapping(existing, &padded)
}

/// Validates a semester creation form.
///
/// Checks, stopping at the first failure:
/// 1. Start and end dates are present ([`MissingDates`](ValidationErrorKind::MissingDates))
/// 2. Start precedes end ([`InvalidRange`](ValidationErrorKind::InvalidRange))
/// 3. No overlap with existing semesters ([`Overlap`](ValidationErrorKind::Overlap))
/// 4. If both registration dates are given, registration start precedes
///    registration end
///    ([`InvalidRegistrationRange`](ValidationErrorKind::InvalidRegistrationRange))
pub fn validate_semester_creation(
    existing: &[Semester],
    candidate: &SemesterDraft,
) -> ValidationResult {
    validate_semester_creation_with_gap(existing, candidate, 1)
}

/// Like [`validate_semester_creation`], additionally requiring `gap_days`
/// between the candidate and every existing semester.
///
/// The gap is measured the way [`compute_min_start_date_with_gap`] measures
/// it: with a gap of 7, a semester running 2024-01-01 to 2024-06-30 admits
/// neighbours ending by 2023-12-25 or starting from 2024-07-07. A candidate that
/// shares a day with an existing semester is still
/// [`Overlap`](ValidationErrorKind::Overlap); one that only falls inside the
/// gap is [`InsufficientGap`](ValidationErrorKind::InsufficientGap). The gap
/// check runs right after the overlap check.
pub fn validate_semester_creation_with_gap(
    existing: &[Semester],
    candidate: &SemesterDraft,
    gap_days: u32,
) -> ValidationResult {
    let (start, end) = match (candidate.start_date, candidate.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            debug!(name = %candidate.name, "semester rejected: missing dates");
            return Err(ValidationError::new(
                ValidationErrorKind::MissingDates,
                "Start date and end date are required",
            ));
        }
    };

    let range = DateRange::new(start, end);
    if !range.is_well_formed() {
        debug!(%start, %end, "semester rejected: inverted range");
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidRange,
            format!("Start date {start} must be before end date {end}"),
        ));
    }

    if let Some(conflict) = find_overlapping(existing, &range) {
        debug!(%start, %end, conflict_id = conflict.id, "semester rejected: overlap");
        return Err(ValidationError::new(
            ValidationErrorKind::Overlap,
            format!(
                "Dates {start} to {end} overlap semester '{}' ({} to {})",
                conflict.name, conflict.start_date, conflict.end_date
            ),
        ));
    }

    if let Some(neighbour) = find_too_close(existing, &range, gap_days) {
        debug!(%start, %end, gap_days, neighbour_id = neighbour.id, "semester rejected: gap");
        return Err(ValidationError::new(
            ValidationErrorKind::InsufficientGap,
            format!(
                "Dates {start} to {end} must be at least {gap_days} days from semester '{}' \
                 ({} to {})",
                neighbour.name, neighbour.start_date, neighbour.end_date
            ),
        ));
    }

    if let (Some(reg_start), Some(reg_end)) =
        (candidate.registration_start, candidate.registration_end)
    {
        if reg_start >= reg_end {
            debug!(%reg_start, %reg_end, "semester rejected: inverted registration window");
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidRegistrationRange,
                format!("Registration start {reg_start} must be before registration end {reg_end}"),
            ));
        }
    }

    Ok(())
}

/// The semester whose range contains `date`, if any.
///
/// Semesters are non-overlapping, so at most one matches; on malformed input
/// the first match wins.
pub fn semester_containing(semesters: &[Semester], date: NaiveDate) -> Option<&Semester> {
    semesters.iter().find(|s| s.range().contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_semesters() -> Vec<Semester> {
        vec![
            Semester::new(1, d(2023, 9, 1), d(2023, 12, 20)).with_name("Fall 2023"),
            Semester::new(2, d(2024, 1, 1), d(2024, 6, 30)).with_name("Spring 2024"),
        ]
    }

    #[test]
    fn test_latest_end_date() {
        assert_eq!(find_latest_end_date(&sample_semesters()), Some(d(2024, 6, 30)));
        assert_eq!(find_latest_end_date(&[]), None);
    }

    #[test]
    fn test_latest_end_date_unordered_input() {
        let mut semesters = sample_semesters();
        semesters.reverse();
        assert_eq!(find_latest_end_date(&semesters), Some(d(2024, 6, 30)));
    }

    #[test]
    fn test_min_start_date() {
        assert_eq!(compute_min_start_date(&sample_semesters()), Some(d(2024, 7, 1)));
        assert_eq!(compute_min_start_date(&[]), None);
    }

    #[test]
    fn test_min_start_date_crosses_year() {
        let semesters = vec![Semester::new(1, d(2024, 7, 1), d(2024, 12, 31))];
        assert_eq!(compute_min_start_date(&semesters), Some(d(2025, 1, 1)));
    }

    #[test]
    fn test_min_start_date_saturates() {
        let semesters = vec![Semester::new(1, d(2024, 1, 1), NaiveDate::MAX)];
        assert_eq!(compute_min_start_date(&semesters), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_overlap_partial() {
        assert!(check_date_overlap(&sample_semesters(), d(2024, 6, 15), d(2024, 12, 31)));
    }

    #[test]
    fn test_overlap_start_on_existing_end() {
        assert!(check_date_overlap(&sample_semesters(), d(2024, 6, 30), d(2024, 12, 31)));
    }

    #[test]
    fn test_overlap_end_on_existing_start() {
        assert!(check_date_overlap(&sample_semesters(), d(2023, 6, 1), d(2023, 9, 1)));
    }

    #[test]
    fn test_overlap_candidate_covers_existing() {
        assert!(check_date_overlap(&sample_semesters(), d(2023, 1, 1), d(2025, 1, 1)));
    }

    #[test]
    fn test_overlap_candidate_inside_existing() {
        assert!(check_date_overlap(&sample_semesters(), d(2024, 2, 1), d(2024, 3, 1)));
    }

    #[test]
    fn test_no_overlap_after() {
        assert!(!check_date_overlap(&sample_semesters(), d(2024, 7, 1), d(2024, 12, 20)));
    }

    #[test]
    fn test_no_overlap_in_gap() {
        // Between Fall 2023 and Spring 2024
        assert!(!check_date_overlap(&sample_semesters(), d(2023, 12, 21), d(2023, 12, 31)));
    }

    #[test]
    fn test_no_overlap_empty() {
        assert!(!check_date_overlap(&[], d(2024, 1, 1), d(2024, 6, 30)));
    }

    #[test]
    fn test_valid_creation() {
        let draft = SemesterDraft::new(d(2024, 7, 1), d(2024, 12, 20))
            .with_name("Fall 2024")
            .with_registration(d(2024, 6, 1), d(2024, 6, 25));
        assert!(validate_semester_creation(&sample_semesters(), &draft).is_ok());
    }

    #[test]
    fn test_missing_dates() {
        let draft = SemesterDraft {
            end_date: Some(d(2024, 12, 20)),
            ..SemesterDraft::default()
        };
        let err = validate_semester_creation(&sample_semesters(), &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingDates);

        let err = validate_semester_creation(&[], &SemesterDraft::default()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingDates);
    }

    #[test]
    fn test_invalid_range() {
        let draft = SemesterDraft::new(d(2024, 6, 1), d(2024, 1, 1));
        let err = validate_semester_creation(&[], &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidRange);
    }

    #[test]
    fn test_same_day_range_is_invalid() {
        let draft = SemesterDraft::new(d(2024, 8, 1), d(2024, 8, 1));
        let err = validate_semester_creation(&[], &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidRange);
    }

    #[test]
    fn test_invalid_range_reported_before_overlap() {
        // Both dates sit inside Spring 2024, but the range is inverted.
        let draft = SemesterDraft::new(d(2024, 6, 1), d(2024, 1, 1));
        let err = validate_semester_creation(&sample_semesters(), &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidRange);
    }

    #[test]
    fn test_overlap_names_conflict() {
        let draft = SemesterDraft::new(d(2024, 6, 15), d(2024, 12, 31));
        let err = validate_semester_creation(&sample_semesters(), &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Overlap);
        assert!(err.message.contains("Spring 2024"));
    }

    #[test]
    fn test_overlap_reported_before_registration() {
        let draft = SemesterDraft::new(d(2024, 6, 15), d(2024, 12, 31))
            .with_registration(d(2024, 6, 10), d(2024, 6, 1));
        let err = validate_semester_creation(&sample_semesters(), &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Overlap);
    }

    #[test]
    fn test_invalid_registration_range() {
        let draft = SemesterDraft::new(d(2024, 7, 1), d(2024, 12, 20))
            .with_registration(d(2024, 6, 25), d(2024, 6, 25));
        let err = validate_semester_creation(&sample_semesters(), &draft).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidRegistrationRange);
    }

    #[test]
    fn test_partial_registration_not_checked() {
        let draft = SemesterDraft {
            registration_start: Some(d(2025, 1, 1)),
            ..SemesterDraft::new(d(2024, 7, 1), d(2024, 12, 20))
        };
        assert!(validate_semester_creation(&sample_semesters(), &draft).is_ok());
    }

    #[test]
    fn test_semester_containing() {
        let semesters = sample_semesters();
        assert_eq!(semester_containing(&semesters, d(2024, 3, 1)).map(|s| s.id), Some(2));
        assert_eq!(semester_containing(&semesters, d(2023, 12, 20)).map(|s| s.id), Some(1));
        assert!(semester_containing(&semesters, d(2023, 12, 25)).is_none());
        assert!(semester_containing(&[], d(2024, 3, 1)).is_none());
    }

    #[test]
    fn test_gap_rejects_close_neighbour() {
        let semesters = vec![Semester::new(1, d(2024, 1, 1), d(2024, 6, 30)).with_name("Spring")];
        let draft = SemesterDraft::new(d(2024, 7, 1), d(2024, 12, 20));

        assert!(validate_semester_creation(&semesters, &draft).is_ok());
        let err = validate_semester_creation_with_gap(&semesters, &draft, 7).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InsufficientGap);
        assert!(err.message.contains("'Spring'"));

        let min_start = compute_min_start_date_with_gap(&semesters, 7).unwrap();
        assert_eq!(min_start, d(2024, 7, 7));
        let draft = SemesterDraft::new(min_start, d(2024, 12, 20));
        assert!(validate_semester_creation_with_gap(&semesters, &draft, 7).is_ok());
    }

    #[test]
    fn test_gap_applies_before_existing() {
        let semesters = vec![Semester::new(1, d(2024, 1, 1), d(2024, 6, 30))];

        let tight = SemesterDraft::new(d(2023, 9, 1), d(2023, 12, 26));
        let err = validate_semester_creation_with_gap(&semesters, &tight, 7).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InsufficientGap);

        let clear = SemesterDraft::new(d(2023, 9, 1), d(2023, 12, 25));
        assert!(validate_semester_creation_with_gap(&semesters, &clear, 7).is_ok());
    }

    #[test]
    fn test_gap_keeps_overlap_kind() {
        let draft = SemesterDraft::new(d(2024, 6, 1), d(2024, 12, 20));
        let err = validate_semester_creation_with_gap(&sample_semesters(), &draft, 7).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Overlap);
    }

    #[test]
    fn test_gap_reported_before_registration() {
        let semesters = vec![Semester::new(1, d(2024, 1, 1), d(2024, 6, 30))];
        let draft = SemesterDraft::new(d(2024, 7, 3), d(2024, 12, 20))
            .with_registration(d(2024, 6, 25), d(2024, 6, 20));
        let err = validate_semester_creation_with_gap(&semesters, &draft, 7).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InsufficientGap);
    }
}
