//! Scheduling domain models.
//!
//! Typed records for the academic calendar and project milestones. All
//! dates are whole calendar days ([`chrono::NaiveDate`]); loosely typed
//! backend payloads are normalized into these types by [`crate::ingest`]
//! before any comparison runs.
//!
//! # Domain Mappings
//!
//! | capstone-schedule | Backend resource | Form |
//! |-------------------|------------------|------|
//! | Semester | `/semesters` record | - |
//! | SemesterDraft | - | Create Semester |
//! | Milestone | `/milestones` record | - |
//! | DelayUpdate | - | Edit Milestone (delay toggle) |

mod date_range;
mod milestone;
mod semester;

pub use date_range::DateRange;
pub use milestone::{DelayState, DelayUpdate, Milestone, MilestoneStatus};
pub use semester::{Semester, SemesterDraft};
