//! Milestone progress indicators.
//!
//! Summarizes where a project stands from its milestone list.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weighted completion | Sum of weights of completed milestones (max 1.0) |
//! | Delayed count | Milestones currently flagged delayed |
//! | Overdue count | Not completed and due before `today` |
//! | Total / max delay | `due_date - original_due_date` over delayed milestones (days) |
//! | On-time rate | Completed without a delay / completed |

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Milestone;

/// Project progress indicators.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MilestoneKpi {
    /// Fraction of the project grade earned by completed milestones (0.0..=1.0).
    pub weighted_completion: f64,
    /// Number of milestones.
    pub total_count: usize,
    /// Number of completed milestones.
    pub completed_count: usize,
    /// Number of milestones currently delayed.
    pub delayed_count: usize,
    /// Number of unfinished milestones past their due date.
    pub overdue_count: usize,
    /// Sum of delay lengths (days).
    pub total_delay_days: i64,
    /// Longest single delay (days).
    pub max_delay_days: i64,
    /// Fraction of completed milestones that were never delayed.
    pub on_time_rate: f64,
}

impl MilestoneKpi {
    /// Computes indicators for `milestones` as of `today`.
    pub fn calculate(milestones: &[Milestone], today: NaiveDate) -> Self {
        let mut weighted_completion: f64 = 0.0;
        let mut completed_count: usize = 0;
        let mut completed_on_time: usize = 0;
        let mut delayed_count: usize = 0;
        let mut overdue_count: usize = 0;
        let mut total_delay_days: i64 = 0;
        let mut max_delay_days: i64 = 0;

        for m in milestones {
            if m.is_delayed {
                delayed_count += 1;
                let delay = m.delay_days();
                total_delay_days += delay;
                max_delay_days = max_delay_days.max(delay);
            }

            if m.is_completed() {
                completed_count += 1;
                weighted_completion += m.weight;
                if !m.is_delayed {
                    completed_on_time += 1;
                }
            } else if m.due_date < today {
                overdue_count += 1;
            }
        }

        let on_time_rate = if completed_count == 0 {
            1.0
        } else {
            completed_on_time as f64 / completed_count as f64
        };

        Self {
            weighted_completion: weighted_completion.min(1.0),
            total_count: milestones.len(),
            completed_count,
            delayed_count,
            overdue_count,
            total_delay_days,
            max_delay_days,
            on_time_rate,
        }
    }

    /// Whether every milestone is completed.
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.completed_count == self.total_count
    }
}
