//! Period counter models produced by the day aggregator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minute and day-type counters accumulated over a date range.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::PeriodCounters;
///
/// let mut total = PeriodCounters::default();
/// let mut day = PeriodCounters::default();
/// day.immediate_minutes = 480;
/// day.count_day_type("AEX");
///
/// total.merge(&day);
/// total.merge(&day);
/// assert_eq!(total.immediate_minutes, 960);
/// assert_eq!(total.category_count("AEX"), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCounters {
    /// Minutes on core duties.
    pub immediate_minutes: i64,
    /// Approved absence minutes.
    pub ap_minutes: i64,
    /// Training minutes.
    pub training_minutes: i64,
    /// Overtime minutes inferred from call logs. May be fractional.
    pub overtime_minutes: Decimal,
    /// Number of days per exception schedule code.
    pub category_counts: BTreeMap<String, u32>,
}

impl PeriodCounters {
    /// Adds another set of counters into this one.
    pub fn merge(&mut self, other: &PeriodCounters) {
        self.immediate_minutes += other.immediate_minutes;
        self.ap_minutes += other.ap_minutes;
        self.training_minutes += other.training_minutes;
        self.overtime_minutes += other.overtime_minutes;
        for (code, count) in &other.category_counts {
            *self.category_counts.entry(code.clone()).or_insert(0) += count;
        }
    }

    /// Counts one more day with the given schedule code.
    pub fn count_day_type(&mut self, code: &str) {
        *self.category_counts.entry(code.to_string()).or_insert(0) += 1;
    }

    /// Days counted for a schedule code, zero when never seen.
    pub fn category_count(&self, code: &str) -> u32 {
        self.category_counts.get(code).copied().unwrap_or(0)
    }

    /// Returns true when nothing has been counted.
    pub fn is_zero(&self) -> bool {
        self.immediate_minutes == 0
            && self.ap_minutes == 0
            && self.training_minutes == 0
            && self.overtime_minutes.is_zero()
            && self.category_counts.is_empty()
    }
}

/// How much of a day an aggregation left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipScope {
    /// The shift record was unreadable; nothing from the day was counted.
    WholeDay,
    /// The call log was unreadable; scheduled minutes were counted but no
    /// overtime was reconciled.
    Overtime,
}

/// A day fully or partly left out of an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDay {
    /// The date that was skipped.
    pub date: NaiveDate,
    /// What was left out.
    pub scope: SkipScope,
    /// Why the day could not be counted.
    pub reason: String,
}

/// Counters for a range along with any days that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    /// The accumulated counters.
    pub counters: PeriodCounters,
    /// Days fully or partly skipped because a record was unreadable.
    pub skipped_days: Vec<SkippedDay>,
}
