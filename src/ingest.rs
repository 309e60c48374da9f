//! Normalization of backend and form payloads.
//!
//! The backend wraps some responses as `{ "success": true, "data": ... }`
//! and returns others as bare arrays. Dates arrive as `YYYY-MM-DD` strings,
//! naive datetimes, or RFC 3339 timestamps. Everything is parsed into the
//! typed models here, before any comparison runs.
//!
//! # Tolerance
//! - Existing records: a non-array payload yields an empty list; records
//!   with missing or unparseable dates are skipped with a warning.
//! - Candidate forms: empty date strings count as absent; anything else
//!   that is not a date is [`InvalidDateFormat`](ValidationErrorKind::InvalidDateFormat).
//!   Any other field of the wrong JSON type is
//!   [`InvalidPayload`](ValidationErrorKind::InvalidPayload).
//! - `null` counts as absent for every field.
//!
//! Field names are accepted in camelCase or snake_case.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::ScheduleError;
use crate::models::{DelayUpdate, Milestone, MilestoneStatus, Semester, SemesterDraft};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Parses a date string.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]`, and RFC 3339
/// timestamps (the calendar day in the timestamp's own offset). Blank
/// input is `Ok(None)`.
///
/// # Examples
///
/// ```
/// use capstone_schedule::ingest::parse_date;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(parse_date("dueDate", "2024-03-01").unwrap(), Some(day));
/// assert_eq!(parse_date("dueDate", "2024-03-01T00:00:00.000Z").unwrap(), Some(day));
/// assert_eq!(parse_date("dueDate", "  ").unwrap(), None);
/// assert!(parse_date("dueDate", "03/01/2024").is_err());
/// ```
pub fn parse_date(field: &str, text: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(ts.date_naive()));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(ts.date()));
    }
    Err(ValidationError::new(
        ValidationErrorKind::InvalidDateFormat,
        format!("{field}: '{text}' is not a valid date"),
    ))
}

/// Parses an optional JSON date value (string or null).
fn parse_date_value(
    field: &str,
    value: Option<&Value>,
) -> Result<Option<NaiveDate>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => parse_date(field, text),
        Some(other) => Err(ValidationError::new(
            ValidationErrorKind::InvalidDateFormat,
            format!("{field}: expected a date string, got {other}"),
        )),
    }
}

/// Strips a `{ "data": ... }` response envelope.
///
/// Any other value is returned unchanged.
pub fn unwrap_envelope(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("data").unwrap_or(value),
        _ => value,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSemester {
    id: Option<i64>,
    name: Option<String>,
    #[serde(alias = "start_date")]
    start_date: Option<Value>,
    #[serde(alias = "end_date")]
    end_date: Option<Value>,
    #[serde(alias = "registration_start")]
    registration_start: Option<Value>,
    #[serde(alias = "registration_end")]
    registration_end: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawMilestone {
    id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    weight: Option<f64>,
    status: Option<MilestoneStatus>,
    #[serde(alias = "start_date")]
    start_date: Option<Value>,
    #[serde(alias = "due_date")]
    due_date: Option<Value>,
    #[serde(alias = "original_due_date")]
    original_due_date: Option<Value>,
    #[serde(alias = "is_delayed")]
    is_delayed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDelayUpdate {
    #[serde(alias = "is_delayed")]
    is_delayed: Option<bool>,
    #[serde(alias = "due_date")]
    due_date: Option<Value>,
}

/// Decodes a form object, reporting type mismatches instead of dropping them.
fn decode_form<T: DeserializeOwned>(form: &str, value: &Value) -> Result<T, ValidationError> {
    T::deserialize(value).map_err(|e| {
        ValidationError::new(ValidationErrorKind::InvalidPayload, format!("{form}: {e}"))
    })
}

fn malformed(record: &'static str, reason: impl Into<String>) -> ScheduleError {
    ScheduleError::MalformedRecord {
        record,
        reason: reason.into(),
    }
}

/// Converts one backend semester record.
pub fn semester_from_json(value: &Value) -> Result<Semester, ScheduleError> {
    let raw = RawSemester::deserialize(value)?;
    let date = |field: &str, v: Option<&Value>| {
        parse_date_value(field, v).map_err(|e| malformed("semester", e.message))
    };

    let start_date = date("startDate", raw.start_date.as_ref())?
        .ok_or_else(|| malformed("semester", "startDate is missing"))?;
    let end_date = date("endDate", raw.end_date.as_ref())?
        .ok_or_else(|| malformed("semester", "endDate is missing"))?;

    Ok(Semester {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        start_date,
        end_date,
        registration_start: date("registrationStart", raw.registration_start.as_ref())?,
        registration_end: date("registrationEnd", raw.registration_end.as_ref())?,
    })
}

/// Converts one backend milestone record.
pub fn milestone_from_json(value: &Value) -> Result<Milestone, ScheduleError> {
    let raw = RawMilestone::deserialize(value)?;
    let date = |field: &str, v: Option<&Value>| {
        parse_date_value(field, v).map_err(|e| malformed("milestone", e.message))
    };

    let due_date = date("dueDate", raw.due_date.as_ref())?
        .ok_or_else(|| malformed("milestone", "dueDate is missing"))?;

    Ok(Milestone {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        weight: raw.weight.unwrap_or_default(),
        status: raw.status.unwrap_or_default(),
        start_date: date("startDate", raw.start_date.as_ref())?,
        due_date,
        original_due_date: date("originalDueDate", raw.original_due_date.as_ref())?,
        is_delayed: raw.is_delayed.unwrap_or_default(),
    })
}

/// Collects every well-formed record from a list payload.
fn collect_records<T>(
    value: &Value,
    record: &'static str,
    convert: impl Fn(&Value) -> Result<T, ScheduleError>,
) -> Vec<T> {
    let Value::Array(items) = unwrap_envelope(value) else {
        warn!(record, "expected a list payload; treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match convert(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(record, index, error = %e, "skipping record");
                None
            }
        })
        .collect()
}

/// Existing semesters from a backend payload.
///
/// A non-array payload yields an empty list, so
/// [`find_latest_end_date`](crate::validation::find_latest_end_date) on the
/// result is `None`.
pub fn semesters_from_json(value: &Value) -> Vec<Semester> {
    collect_records(value, "semester", semester_from_json)
}

/// Existing milestones from a backend payload.
pub fn milestones_from_json(value: &Value) -> Vec<Milestone> {
    collect_records(value, "milestone", milestone_from_json)
}

/// A semester creation form.
///
/// A payload that is not an object decodes as an empty draft, which
/// validation then reports as missing dates. An object with a field of the
/// wrong type is [`InvalidPayload`](ValidationErrorKind::InvalidPayload).
pub fn semester_draft_from_json(value: &Value) -> Result<SemesterDraft, ValidationError> {
    let raw: RawSemester = match unwrap_envelope(value) {
        form @ Value::Object(_) => decode_form("semester form", form)?,
        _ => RawSemester::default(),
    };
    Ok(SemesterDraft {
        name: raw.name.unwrap_or_default(),
        start_date: parse_date_value("startDate", raw.start_date.as_ref())?,
        end_date: parse_date_value("endDate", raw.end_date.as_ref())?,
        registration_start: parse_date_value("registrationStart", raw.registration_start.as_ref())?,
        registration_end: parse_date_value("registrationEnd", raw.registration_end.as_ref())?,
    })
}

/// A milestone delay form.
///
/// The payload must be an object. An absent or `null` `isDelayed` means the
/// milestone is on time.
pub fn delay_update_from_json(value: &Value) -> Result<DelayUpdate, ValidationError> {
    let form = unwrap_envelope(value);
    if !form.is_object() {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidPayload,
            format!("delay update: expected an object, got {form}"),
        ));
    }
    let raw: RawDelayUpdate = decode_form("delay update", form)?;
    Ok(DelayUpdate {
        is_delayed: raw.is_delayed.unwrap_or_default(),
        due_date: parse_date_value("dueDate", raw.due_date.as_ref())?,
    })
}
