//! Employee profile model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The employee settings the paycheck estimate depends on.
///
/// Every field is optional because the profile is filled in by the user
/// after install; an unset employment type means "not configured".
///
/// # Example
///
/// ```
/// use paycheck_engine::models::EmployeeProfile;
///
/// let profile = EmployeeProfile::new("A", "2");
/// assert_eq!(profile.level_key().unwrap(), "L2");
///
/// assert!(EmployeeProfile::default().employment_type().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employment type key in the rate table.
    #[serde(default)]
    pub employment_type: Option<String>,
    /// The level within the employment type, without the `L` prefix.
    #[serde(default)]
    pub level: Option<String>,
    /// First day of work, bounding the period history.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeProfile {
    /// Creates a profile with a type and level and no hire date.
    pub fn new(employment_type: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            employment_type: Some(employment_type.into()),
            level: Some(level.into()),
            hire_date: None,
        }
    }

    /// The employment type, or `ProfileIncomplete` when unset or blank.
    pub fn employment_type(&self) -> EngineResult<&str> {
        Self::required(&self.employment_type, "employment_type")
    }

    /// The rate table key for the level, e.g. `"L2"`.
    pub fn level_key(&self) -> EngineResult<String> {
        Self::required(&self.level, "level").map(|level| format!("L{}", level))
    }

    fn required<'a>(value: &'a Option<String>, field: &str) -> EngineResult<&'a str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| EngineError::ProfileIncomplete {
                field: field.to_string(),
            })
    }
}
