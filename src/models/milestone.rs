//! Milestone model.
//!
//! A milestone is a weighted checkpoint within a capstone project. Its due
//! date may be pushed back ("delayed"); the due date in effect just before
//! the first delay is kept in `original_due_date` until the milestone is
//! put back on time.
//!
//! # Delay States
//!
//! | State | `is_delayed` | `original_due_date` |
//! |-------|--------------|---------------------|
//! | OnTime | `false` | `None` (ignored if set) |
//! | Delayed | `true` | `Some(d)` with `due_date > d` |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateRange;

/// Workflow status of a milestone.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MilestoneStatus {
    /// Not started.
    #[default]
    Pending,
    /// Work under way.
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    /// Finished.
    Completed,
    /// Running late.
    Delayed,
}

/// A project milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Share of the project grade (0 = unweighted, otherwise in (0, 1]).
    #[serde(default)]
    pub weight: f64,
    /// Workflow status.
    #[serde(default)]
    pub status: MilestoneStatus,
    /// Planned start day.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Currently active due date.
    pub due_date: NaiveDate,
    /// Due date in effect immediately before the milestone was delayed.
    #[serde(default)]
    pub original_due_date: Option<NaiveDate>,
    /// Whether the milestone is currently delayed.
    #[serde(default)]
    pub is_delayed: bool,
}

impl Milestone {
    /// Creates an on-time, pending milestone due on `due_date`.
    pub fn new(id: i64, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            weight: 0.0,
            status: MilestoneStatus::Pending,
            start_date: None,
            due_date,
            original_due_date: None,
            is_delayed: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the grade weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: MilestoneStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the planned start day.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Marks the milestone delayed from `original_due_date` to its current due date.
    pub fn delayed_from(mut self, original_due_date: NaiveDate) -> Self {
        self.original_due_date = Some(original_due_date);
        self.is_delayed = true;
        self
    }

    /// Current delay state.
    #[inline]
    pub fn delay_state(&self) -> DelayState {
        DelayState::of(self)
    }

    /// The due date a delay is measured against.
    ///
    /// For a delayed milestone, the recorded original (once captured it is
    /// never replaced by later delay edits). For an on-time milestone, the
    /// active due date; a stale `original_due_date` is ignored.
    #[inline]
    pub fn baseline_due_date(&self) -> NaiveDate {
        match self.original_due_date {
            Some(original) if self.is_delayed => original,
            _ => self.due_date,
        }
    }

    /// Days the due date has been pushed back. Zero when on time.
    pub fn delay_days(&self) -> i64 {
        match (self.is_delayed, self.original_due_date) {
            (true, Some(original)) => (self.due_date - original).num_days().max(0),
            _ => 0,
        }
    }

    /// Whether the milestone is finished.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }

    /// Planned working span, if a start date is set.
    pub fn window(&self) -> Option<DateRange> {
        self.start_date.map(|start| DateRange::new(start, self.due_date))
    }

    /// Whether the delay fields are mutually consistent.
    ///
    /// A delayed milestone needs an original due date strictly before the
    /// active one. On-time milestones are always consistent; a leftover
    /// `original_due_date` is ignored.
    pub fn is_consistent(&self) -> bool {
        if !self.is_delayed {
            return true;
        }
        matches!(self.original_due_date, Some(original) if self.due_date > original)
    }
}

/// Delay state of a milestone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DelayState {
    /// `is_delayed == false`.
    OnTime,
    /// `is_delayed == true`.
    Delayed,
}

impl DelayState {
    /// Reads the state from a milestone's flag.
    pub fn of(milestone: &Milestone) -> Self {
        Self::from_flag(milestone.is_delayed)
    }

    /// Maps an `is_delayed` flag to a state.
    pub fn from_flag(is_delayed: bool) -> Self {
        if is_delayed {
            DelayState::Delayed
        } else {
            DelayState::OnTime
        }
    }
}

/// A proposed change to a milestone's delay flag and due date.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DelayUpdate {
    /// Target delay flag.
    pub is_delayed: bool,
    /// Requested due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl DelayUpdate {
    /// Requests a delay to `due_date`.
    pub fn delay_to(due_date: NaiveDate) -> Self {
        Self {
            is_delayed: true,
            due_date: Some(due_date),
        }
    }

    /// Requests the milestone be put back on time.
    ///
    /// `due_date` is the date the caller wants restored, if any.
    pub fn on_time(due_date: Option<NaiveDate>) -> Self {
        Self {
            is_delayed: false,
            due_date,
        }
    }

    /// Target state.
    #[inline]
    pub fn target_state(&self) -> DelayState {
        DelayState::from_flag(self.is_delayed)
    }
}
