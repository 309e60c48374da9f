//! Calendar date ranges.
//!
//! Semesters and milestones are scheduled in whole days. A range covers
//! both of its endpoints.
//!
//! # Overlap
//! Two ranges overlap iff they share at least one day. A range ending on
//! the day another begins counts as overlapping; adjacent scheduling needs
//! a one-day gap (see [`compute_min_start_date`](crate::validation::compute_min_start_date)).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed date interval [start, end].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `start` precedes `end`.
    ///
    /// A single-day range is not well formed for semesters.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Number of days from start to end (end - start).
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether a date falls within this range, endpoints included.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether this range fully covers `other`.
    #[inline]
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether two ranges share at least one day.
    ///
    /// Overlap is declared when this range's start or end lands inside
    /// `other`, or when this range covers `other` entirely.
    pub fn overlaps(&self, other: &Self) -> bool {
        other.contains(self.start) || other.contains(self.end) || self.covers(other)
    }
}
