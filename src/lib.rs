//! Scheduling rules for academic capstone projects.
//!
//! Provides the checks that semester and milestone forms run before a
//! create or update request reaches the project-management backend. The
//! checks are pure: callers pass the already-fetched records in and get a
//! value back; nothing here performs I/O against the backend.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Semester`, `SemesterDraft`, `Milestone`,
//!   `DelayUpdate`, `DelayState`, `DateRange`
//! - **`validation`**: Semester overlap and creation checks, milestone delay
//!   transitions, weight and window checks
//! - **`ingest`**: Normalizes backend JSON (enveloped or bare, mixed date
//!   formats) into the typed models
//! - **`progress`**: Milestone progress indicators
//! - **`config`**: TOML-backed validator settings
//!
//! # Date Model
//!
//! All dates are calendar days ([`chrono::NaiveDate`]). Semester ranges are
//! closed on both ends.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod progress;
pub mod validation;

pub use config::{RevertPolicy, ValidatorConfig};
pub use error::ScheduleError;
pub use validation::{SchedulingValidator, ValidationError, ValidationErrorKind, ValidationResult};
