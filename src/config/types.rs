//! Configuration types for paycheck estimation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayCategory;

/// Correction applied to call log times, in minutes. The call log clock
/// runs two hours ahead of the schedule clock.
pub const DEFAULT_CALL_LOG_OFFSET_MINUTES: i64 = -120;

/// Default bound on a single record store read, in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5_000;

/// The hourly rate for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRate {
    /// Hourly rate.
    pub rate: Decimal,
}

/// Rates for one employment type.
///
/// Levels sit next to `reported` under keys `L1`, `L2`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRates {
    /// Flat rate the holiday multipliers apply to.
    #[serde(default)]
    pub reported: Decimal,
    /// Hourly rate per level key.
    #[serde(flatten)]
    pub levels: HashMap<String, LevelRate>,
}

/// Multipliers for the holiday categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayMultipliers {
    /// Multiplier for `AEX` days.
    #[serde(default)]
    pub aex: Decimal,
    /// Multiplier for `MEX` days.
    #[serde(default)]
    pub mex: Decimal,
}

impl HolidayMultipliers {
    /// The multiplier for a holiday category.
    pub fn multiplier(&self, category: HolidayCategory) -> Decimal {
        match category {
            HolidayCategory::Aex => self.aex,
            HolidayCategory::Mex => self.mex,
        }
    }
}

/// The pay rate table, keyed by employment type then level.
///
/// # Example
///
/// ```
/// use paycheck_engine::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let yaml = r#"
/// holiday:
///   aex: 2
///   mex: 3
/// A:
///   reported: 80
///   L2:
///     rate: 100
/// "#;
///
/// let table: RateTable = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(table.hourly_rate("A", "L2").unwrap(), Decimal::from(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Holiday multipliers shared by all employment types.
    #[serde(default)]
    pub holiday: HolidayMultipliers,
    /// Rates per employment type.
    #[serde(flatten)]
    pub employment_types: HashMap<String, EmploymentRates>,
}

impl RateTable {
    /// Rates for an employment type.
    pub fn employment(&self, employment_type: &str) -> EngineResult<&EmploymentRates> {
        self.employment_types
            .get(employment_type)
            .ok_or_else(|| EngineError::RateNotFound {
                employment_type: employment_type.to_string(),
                level: String::new(),
            })
    }

    /// The hourly rate for an employment type and level key.
    pub fn hourly_rate(&self, employment_type: &str, level_key: &str) -> EngineResult<Decimal> {
        self.employment(employment_type)?
            .levels
            .get(level_key)
            .map(|l| l.rate)
            .ok_or_else(|| EngineError::RateNotFound {
                employment_type: employment_type.to_string(),
                level: level_key.to_string(),
            })
    }

    /// The flat rate for a holiday category: `reported * multiplier`.
    pub fn holiday_rate(
        &self,
        employment_type: &str,
        category: HolidayCategory,
    ) -> EngineResult<Decimal> {
        let reported = self.employment(employment_type)?.reported;
        Ok(reported * self.holiday.multiplier(category))
    }
}

/// Runtime settings for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Correction applied to call log times before comparing them with the
    /// schedule, in minutes.
    #[serde(default = "default_call_log_offset_minutes")]
    pub call_log_offset_minutes: i64,
    /// Bound on a single record store read, in milliseconds.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_call_log_offset_minutes() -> i64 {
    DEFAULT_CALL_LOG_OFFSET_MINUTES
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            call_log_offset_minutes: DEFAULT_CALL_LOG_OFFSET_MINUTES,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl EngineSettings {
    /// The call log correction in seconds.
    pub fn call_log_offset_seconds(&self) -> i64 {
        self.call_log_offset_minutes * 60
    }

    /// The read timeout as a `Duration`.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
