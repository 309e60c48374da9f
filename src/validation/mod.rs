//! Scheduling rule checks.
//!
//! Pure, stateless gates that form handlers run before a create or update
//! request goes to the backend. Every input is passed explicitly; nothing
//! is read from ambient state.
//!
//! - **Semesters**: latest end date, earliest legal start, closed-interval
//!   overlap, and ordered creation checks.
//! - **Milestones**: delay transitions (capture-once original due date,
//!   strictly-later new due date), grade weights, and start/due ordering.
//!
//! Checks short-circuit: each returns the first failing
//! [`ValidationErrorKind`], so the caller can key one user-facing message
//! off it.

mod milestone;
mod semester;

pub use milestone::{
    apply_milestone_delay, validate_milestone_delay, validate_milestone_weight,
    validate_milestone_window, validate_weight_budget,
};
pub use semester::{
    check_date_overlap, compute_min_start_date, compute_min_start_date_with_gap,
    find_latest_end_date, semester_containing, validate_semester_creation,
    validate_semester_creation_with_gap,
};

use serde::{Deserialize, Serialize};

use crate::config::ValidatorConfig;
use crate::models::{DelayUpdate, Milestone, Semester, SemesterDraft};

/// Validation result.
pub type ValidationResult = Result<(), ValidationError>;

/// A rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
///
/// Serialized as the bare variant name (e.g. `"Overlap"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A semester start or end date is absent.
    MissingDates,
    /// Semester start is not before its end.
    InvalidRange,
    /// Semester range intersects an existing semester.
    Overlap,
    /// Registration start is not before registration end.
    InvalidRegistrationRange,
    /// A delay was requested without a new due date.
    MissingNewDueDate,
    /// The delayed due date does not move past the original due date.
    DueDateNotLaterThanOriginal,
    /// A date string could not be parsed.
    InvalidDateFormat,
    /// A milestone weight is outside (0, 1].
    InvalidWeight,
    /// Milestone weights in a project add up to more than 1.
    WeightBudgetExceeded,
    /// A milestone is due before it starts.
    MilestoneDueBeforeStart,
    /// Semester does not overlap an existing one but falls inside the
    /// configured minimum gap.
    InsufficientGap,
    /// A form payload has a field of the wrong JSON type.
    InvalidPayload,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Scheduling checks bound to a [`ValidatorConfig`].
///
/// The free functions in this module use the default configuration; this
/// wrapper threads the configured gap, revert policy and weight tolerance
/// through them.
#[derive(Debug, Clone, Default)]
pub struct SchedulingValidator {
    config: ValidatorConfig,
}

impl SchedulingValidator {
    /// Creates a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Earliest legal start for a new semester, honoring the configured gap.
    pub fn min_start_date(&self, semesters: &[Semester]) -> Option<chrono::NaiveDate> {
        compute_min_start_date_with_gap(semesters, self.config.min_start_gap_days)
    }

    /// Semester creation checks, requiring the configured gap to every
    /// existing semester. See [`validate_semester_creation_with_gap`].
    pub fn validate_semester(
        &self,
        existing: &[Semester],
        candidate: &SemesterDraft,
    ) -> ValidationResult {
        validate_semester_creation_with_gap(existing, candidate, self.config.min_start_gap_days)
    }

    /// Validates and applies a delay update under the configured revert policy.
    pub fn apply_delay(
        &self,
        current: &Milestone,
        proposed: &DelayUpdate,
    ) -> Result<Milestone, ValidationError> {
        apply_milestone_delay(current, proposed, self.config.revert_policy)
    }

    /// Checks a created or edited milestone against its project's milestones.
    ///
    /// Order: weight range, weight budget, start/due ordering. `siblings` may
    /// include the milestone itself; it is excluded from the budget by id.
    pub fn validate_milestone(
        &self,
        siblings: &[Milestone],
        candidate: &Milestone,
    ) -> ValidationResult {
        validate_milestone_weight(candidate.weight)?;
        validate_weight_budget(
            siblings,
            candidate.weight,
            Some(candidate.id),
            self.config.weight_tolerance,
        )?;
        validate_milestone_window(candidate.start_date, candidate.due_date)
    }
}
