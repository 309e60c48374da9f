//! Subcommand runners.
//!
//! Each runner reads its JSON inputs, runs the matching checks, and prints
//! a JSON report on stdout. The returned flag is `false` when the input was
//! rejected.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, info_span, warn};

use capstone_schedule::ingest;
use capstone_schedule::models::Milestone;
use capstone_schedule::progress::MilestoneKpi;
use capstone_schedule::{SchedulingValidator, ValidationError, ValidationErrorKind};

use crate::cli::{DelayArgs, ProgressArgs, SemesterArgs};

/// Outcome printed for the `semester` and `delay` subcommands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<T: Serialize> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ValidationErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(flatten)]
    detail: T,
}

impl<T: Serialize> Report<T> {
    fn new(outcome: Result<(), ValidationError>, detail: T) -> Self {
        match outcome {
            Ok(()) => Self {
                valid: true,
                error_kind: None,
                message: None,
                detail,
            },
            Err(e) => Self {
                valid: false,
                error_kind: Some(e.kind),
                message: Some(e.message),
                detail,
            },
        }
    }

    fn print(&self) -> Result<bool> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(self.valid)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SemesterDetail {
    min_start_date: Option<NaiveDate>,
    existing_count: usize,
}

#[derive(Debug, Serialize)]
struct DelayDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<Milestone>,
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn semester_report(
    validator: &SchedulingValidator,
    existing: &Value,
    candidate: &Value,
) -> Report<SemesterDetail> {
    let existing = ingest::semesters_from_json(existing);
    info!(count = existing.len(), "existing semesters loaded");

    let detail = SemesterDetail {
        min_start_date: validator.min_start_date(&existing),
        existing_count: existing.len(),
    };

    let outcome = ingest::semester_draft_from_json(candidate)
        .and_then(|draft| validator.validate_semester(&existing, &draft));

    Report::new(outcome, detail)
}

fn delay_report(
    validator: &SchedulingValidator,
    current: &Milestone,
    update: &Value,
) -> Report<DelayDetail> {
    let outcome = ingest::delay_update_from_json(update)
        .and_then(|update| validator.apply_delay(current, &update));

    match outcome {
        Ok(next) => Report::new(Ok(()), DelayDetail { milestone: Some(next) }),
        Err(e) => Report::new(Err(e), DelayDetail { milestone: None }),
    }
}

/// Validate a semester creation form.
pub fn semester(validator: &SchedulingValidator, args: SemesterArgs) -> Result<bool> {
    let _cmd = info_span!("semester").entered();

    let existing = read_json(&args.existing)?;
    let candidate = read_json(&args.candidate)?;
    semester_report(validator, &existing, &candidate).print()
}

/// Validate and apply a milestone delay update.
pub fn delay(validator: &SchedulingValidator, args: DelayArgs) -> Result<bool> {
    let _cmd = info_span!("delay").entered();

    let stored = read_json(&args.milestone)?;
    let current = ingest::milestone_from_json(ingest::unwrap_envelope(&stored))
        .with_context(|| format!("unusable milestone in {}", args.milestone.display()))?;
    if !current.is_consistent() {
        warn!(milestone_id = current.id, "stored milestone has inconsistent delay fields");
    }

    delay_report(validator, &current, &read_json(&args.update)?).print()
}

/// Summarize milestone progress.
pub fn progress(args: ProgressArgs) -> Result<bool> {
    let _cmd = info_span!("progress").entered();

    let milestones = ingest::milestones_from_json(&read_json(&args.milestones)?);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    info!(count = milestones.len(), %today, "computing milestone progress");

    let kpi = MilestoneKpi::calculate(&milestones, today);
    println!("{}", serde_json::to_string_pretty(&kpi)?);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstone_schedule::ValidatorConfig;
    use serde_json::json;
    use std::path::PathBuf;

    fn spring() -> Value {
        json!({
            "success": true,
            "data": [{
                "id": 1,
                "name": "Spring",
                "startDate": "2024-01-01",
                "endDate": "2024-06-30"
            }]
        })
    }

    #[test]
    fn test_semester_report_accepted() {
        let report = semester_report(
            &SchedulingValidator::default(),
            &spring(),
            &json!({ "startDate": "2024-07-01", "endDate": "2024-12-20" }),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({ "valid": true, "minStartDate": "2024-07-01", "existingCount": 1 })
        );
    }

    #[test]
    fn test_semester_report_rejected() {
        let report = semester_report(
            &SchedulingValidator::default(),
            &spring(),
            &json!({ "startDate": "2024-06-30", "endDate": "2024-12-20" }),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errorKind"], "Overlap");
        assert!(value["message"].as_str().unwrap().contains("'Spring'"));
        assert_eq!(value["minStartDate"], "2024-07-01");
    }

    #[test]
    fn test_delay_report_shapes() {
        let validator = SchedulingValidator::default();
        let current = Milestone::new(2, "Prototype", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let update = json!({ "isDelayed": true, "dueDate": "2024-03-15" });
        let ok = delay_report(&validator, &current, &update);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["milestone"]["dueDate"], "2024-03-15");
        assert_eq!(value["milestone"]["originalDueDate"], "2024-03-01");
        assert_eq!(value["milestone"]["isDelayed"], true);
        assert!(value.get("errorKind").is_none());

        let bad = delay_report(&validator, &current, &json!({ "isDelayed": "true" }));
        let value = serde_json::to_value(&bad).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errorKind"], "InvalidPayload");
        assert!(value.get("milestone").is_none());
    }

    #[test]
    fn test_semester_command_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let existing: PathBuf = dir.path().join("semesters.json");
        let candidate: PathBuf = dir.path().join("form.json");
        std::fs::write(&existing, spring().to_string()).unwrap();
        std::fs::write(&candidate, r#"{ "startDate": "2024-07-01", "endDate": "2024-12-20" }"#)
            .unwrap();

        let strict =
            SchedulingValidator::new(ValidatorConfig::default().with_min_start_gap_days(7));
        let args = || SemesterArgs {
            existing: existing.clone(),
            candidate: candidate.clone(),
        };
        assert!(semester(&SchedulingValidator::default(), args()).unwrap());
        assert!(!semester(&strict, args()).unwrap());

        let missing = SemesterArgs {
            existing: dir.path().join("absent.json"),
            candidate: candidate.clone(),
        };
        let err = semester(&SchedulingValidator::default(), missing).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}

