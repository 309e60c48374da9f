//! Validator configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! min_start_gap_days = 1
//! revert_policy = "trust_caller"
//! weight_tolerance = 1e-9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// How the due date is chosen when a delayed milestone is put back on time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevertPolicy {
    /// Use the due date the caller submits; fall back to the recorded
    /// original when none is submitted.
    #[default]
    TrustCaller,
    /// Always restore the recorded original, ignoring the submitted date.
    RestoreOriginal,
}

/// Tunables for the scheduling checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Days between the latest semester end and the earliest new start.
    #[serde(default = "default_min_start_gap_days")]
    pub min_start_gap_days: u32,

    /// Due date restoration on `Delayed -> OnTime`.
    #[serde(default)]
    pub revert_policy: RevertPolicy,

    /// Slack allowed when summing milestone weights against 1.0.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
}

fn default_min_start_gap_days() -> u32 {
    1
}
fn default_weight_tolerance() -> f64 {
    1e-9
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_start_gap_days: default_min_start_gap_days(),
            revert_policy: RevertPolicy::default(),
            weight_tolerance: default_weight_tolerance(),
        }
    }
}

impl ValidatorConfig {
    /// Parses and checks a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ScheduleError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Sets the revert policy.
    pub fn with_revert_policy(mut self, policy: RevertPolicy) -> Self {
        self.revert_policy = policy;
        self
    }

    /// Sets the semester start gap.
    pub fn with_min_start_gap_days(mut self, days: u32) -> Self {
        self.min_start_gap_days = days;
        self
    }

    fn check(&self) -> Result<(), ScheduleError> {
        if self.min_start_gap_days < 1 {
            return Err(ScheduleError::ConfigValue {
                field: "min_start_gap_days",
                reason: format!("must be >= 1, got {}", self.min_start_gap_days),
            });
        }
        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            return Err(ScheduleError::ConfigValue {
                field: "weight_tolerance",
                reason: format!("must be finite and >= 0, got {}", self.weight_tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ValidatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.min_start_gap_days, 1);
        assert_eq!(config.revert_policy, RevertPolicy::TrustCaller);
    }

    #[test]
    fn test_parse_all_fields() {
        let config = ValidatorConfig::from_toml_str(
            r#"
            min_start_gap_days = 7
            revert_policy = "restore_original"
            weight_tolerance = 0.001
            "#,
        )
        .unwrap();
        assert_eq!(config.min_start_gap_days, 7);
        assert_eq!(config.revert_policy, RevertPolicy::RestoreOriginal);
        assert_eq!(config.weight_tolerance, 0.001);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ValidatorConfig::from_toml_str("allow_overlap = true").unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_zero_gap_rejected() {
        // A zero-day gap would let a new semester start on an existing end date.
        let err = ValidatorConfig::from_toml_str("min_start_gap_days = 0").unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::ConfigValue {
                field: "min_start_gap_days",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_gap_rejected() {
        let err = ValidatorConfig::from_toml_str("min_start_gap_days = -3").unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = ValidatorConfig::from_toml_str("weight_tolerance = -0.5").unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::ConfigValue {
                field: "weight_tolerance",
                ..
            }
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "revert_policy = \"restore_original\"").unwrap();

        let config = ValidatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.revert_policy, RevertPolicy::RestoreOriginal);
        assert_eq!(config.min_start_gap_days, 1);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ValidatorConfig::from_file("/nonexistent/capstone.toml").unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
    }
}
