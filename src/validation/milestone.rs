//! Milestone checks and delay transitions.
//!
//! # Delay State Machine
//!
//! | From | To | Rule |
//! |------|----|------|
//! | OnTime | Delayed | new due date > current due date; current due date is captured as original |
//! | Delayed | Delayed | new due date > captured original; original is kept |
//! | Delayed | OnTime | original cleared; due date restored per [`RevertPolicy`] |
//! | OnTime | OnTime | submitted due date accepted as is |
//!
//! There is no terminal state.

use chrono::NaiveDate;
use tracing::debug;

use super::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::config::RevertPolicy;
use crate::models::{DelayState, DelayUpdate, Milestone};

/// Validates a proposed delay update against the milestone's current state.
///
/// When `proposed.is_delayed` is set, the baseline is the milestone's
/// recorded original due date if it is already delayed, otherwise its active
/// due date. An `original_due_date` left on a milestone that is not delayed
/// is stale and ignored, so the baseline follows `is_delayed` rather than the
/// mere presence of the field (see [`Milestone::baseline_due_date`]).
///
/// The new due date must be present
/// ([`MissingNewDueDate`](ValidationErrorKind::MissingNewDueDate)) and
/// strictly later than the baseline
/// ([`DueDateNotLaterThanOriginal`](ValidationErrorKind::DueDateNotLaterThanOriginal)).
///
/// Putting a milestone back on time carries no date constraint.
///
/// # Examples
///
/// ```
/// use capstone_schedule::models::{DelayUpdate, Milestone};
/// use capstone_schedule::validation::{validate_milestone_delay, ValidationErrorKind};
/// use chrono::NaiveDate;
///
/// let due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let milestone = Milestone::new(1, "Proposal", due);
///
/// let later = DelayUpdate::delay_to(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
/// assert!(validate_milestone_delay(&milestone, &later).is_ok());
///
/// let earlier = DelayUpdate::delay_to(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
/// let err = validate_milestone_delay(&milestone, &earlier).unwrap_err();
/// assert_eq!(err.kind, ValidationErrorKind::DueDateNotLaterThanOriginal);
/// ```
pub fn validate_milestone_delay(current: &Milestone, proposed: &DelayUpdate) -> ValidationResult {
    if proposed.is_delayed {
        delayed_due_dates(current, proposed)?;
    }
    Ok(())
}

/// Validates a delay update and returns the milestone after the transition.
///
/// The input milestone is not modified. `status` and every field other than
/// `is_delayed`, `due_date` and `original_due_date` are carried over.
pub fn apply_milestone_delay(
    current: &Milestone,
    proposed: &DelayUpdate,
    policy: RevertPolicy,
) -> Result<Milestone, ValidationError> {
    let from = current.delay_state();
    let mut next = current.clone();

    match proposed.target_state() {
        DelayState::Delayed => {
            let (original, new_due) = delayed_due_dates(current, proposed)?;
            next.original_due_date = Some(original);
            next.due_date = new_due;
            next.is_delayed = true;
        }
        DelayState::OnTime => {
            next.due_date = match (from, policy) {
                (DelayState::Delayed, RevertPolicy::RestoreOriginal) => current.baseline_due_date(),
                (DelayState::Delayed, RevertPolicy::TrustCaller) => {
                    proposed.due_date.unwrap_or_else(|| current.baseline_due_date())
                }
                (DelayState::OnTime, _) => proposed.due_date.unwrap_or(current.due_date),
            };
            next.original_due_date = None;
            next.is_delayed = false;
        }
    }

    debug!(
        milestone_id = current.id,
        ?from,
        to = ?next.delay_state(),
        due_date = %next.due_date,
        "milestone delay transition"
    );
    Ok(next)
}

/// Baseline and new due date for a transition into `Delayed`.
fn delayed_due_dates(
    current: &Milestone,
    proposed: &DelayUpdate,
) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let original = current.baseline_due_date();

    let Some(new_due) = proposed.due_date else {
        debug!(milestone_id = current.id, "delay rejected: no new due date");
        return Err(ValidationError::new(
            ValidationErrorKind::MissingNewDueDate,
            "A new due date is required when marking a milestone as delayed",
        ));
    };

    if new_due <= original {
        debug!(
            milestone_id = current.id,
            %original,
            %new_due,
            "delay rejected: due date not later than original"
        );
        return Err(ValidationError::new(
            ValidationErrorKind::DueDateNotLaterThanOriginal,
            format!("New due date {new_due} must be later than the original due date {original}"),
        ));
    }

    Ok((original, new_due))
}

/// Checks a milestone weight: zero (unweighted) or within (0, 1].
pub fn validate_milestone_weight(weight: f64) -> ValidationResult {
    if weight == 0.0 || (weight > 0.0 && weight <= 1.0) {
        return Ok(());
    }
    Err(ValidationError::new(
        ValidationErrorKind::InvalidWeight,
        format!("Weight must be between 0 and 1, got {weight}"),
    ))
}

/// Checks that a project's milestone weights stay within 1.0.
///
/// `replacing_id` names the milestone being edited, whose stored weight is
/// left out of the sum in favor of `candidate_weight`.
pub fn validate_weight_budget(
    milestones: &[Milestone],
    candidate_weight: f64,
    replacing_id: Option<i64>,
    tolerance: f64,
) -> ValidationResult {
    let committed: f64 = milestones
        .iter()
        .filter(|m| Some(m.id) != replacing_id)
        .map(|m| m.weight)
        .sum();
    let total = committed + candidate_weight;

    if total > 1.0 + tolerance {
        debug!(committed, candidate_weight, total, "milestone rejected: weight budget");
        return Err(ValidationError::new(
            ValidationErrorKind::WeightBudgetExceeded,
            format!(
                "Milestone weights would total {total:.2}; only {:.2} remains",
                (1.0 - committed).max(0.0)
            ),
        ));
    }
    Ok(())
}

/// Checks that a milestone is not due before it starts.
///
/// A milestone may start and be due on the same day.
pub fn validate_milestone_window(
    start_date: Option<NaiveDate>,
    due_date: NaiveDate,
) -> ValidationResult {
    match start_date {
        Some(start) if start > due_date => Err(ValidationError::new(
            ValidationErrorKind::MilestoneDueBeforeStart,
            format!("Due date {due_date} is before start date {start}"),
        )),
        _ => Ok(()),
    }
}
