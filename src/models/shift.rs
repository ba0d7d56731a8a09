//! Day shift record and related types.
//!
//! A [`DayShiftRecord`] is written once per calendar date by the schedule
//! scraper. The serde layout follows the keys the scraper stores.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::{self, ClockTime};

/// The kind of day recorded on the schedule.
///
/// Serialized as the schedule's own code string: `"Normal"`, `"Off"`, or an
/// exception code such as `"AEX"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DayType {
    /// A regular working day.
    Normal,
    /// A scheduled day off.
    Off,
    /// Any other schedule code (holiday variants, leave codes).
    Exception(String),
}

impl DayType {
    /// The schedule code for this day type.
    pub fn code(&self) -> &str {
        match self {
            DayType::Normal => "Normal",
            DayType::Off => "Off",
            DayType::Exception(code) => code,
        }
    }
}

impl From<String> for DayType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "Normal" => DayType::Normal,
            "Off" => DayType::Off,
            _ => DayType::Exception(code),
        }
    }
}

impl From<DayType> for String {
    fn from(day_type: DayType) -> Self {
        match day_type {
            DayType::Exception(code) => code,
            other => other.code().to_string(),
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The holiday variants paid at their own flat rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayCategory {
    /// The `AEX` schedule code.
    Aex,
    /// The `MEX` schedule code.
    Mex,
}

impl HolidayCategory {
    /// Both categories, in breakdown order.
    pub const ALL: [HolidayCategory; 2] = [HolidayCategory::Aex, HolidayCategory::Mex];

    /// The schedule code counted for this category.
    pub fn code(&self) -> &'static str {
        match self {
            HolidayCategory::Aex => "AEX",
            HolidayCategory::Mex => "MEX",
        }
    }
}

/// Minutes per activity recorded for the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledMinutes {
    /// Minutes on core duties.
    pub immediate: i64,
    /// Approved absence/personal minutes.
    pub ap: i64,
    /// Training minutes.
    pub training: i64,
    /// Break minutes.
    #[serde(rename = "break")]
    pub break_minutes: i64,
    /// Lunch minutes.
    pub lunch: i64,
    /// Overtime minutes already on the schedule. Zero means "not yet computed".
    pub overtime: i64,
}

/// The scheduled and actually worked clock window of the day.
///
/// `real_start`/`real_end` are only set once an immediate or training
/// activity has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWindow {
    /// Scheduled start.
    #[serde(default, with = "clock::optional")]
    pub start: Option<ClockTime>,
    /// Scheduled end.
    #[serde(default, with = "clock::optional")]
    pub end: Option<ClockTime>,
    /// Start of the first worked activity.
    #[serde(default, with = "clock::optional")]
    pub real_start: Option<ClockTime>,
    /// End of the last worked activity.
    #[serde(default, with = "clock::optional")]
    pub real_end: Option<ClockTime>,
}

/// One calendar day of schedule data.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::{DayShiftRecord, DayType};
///
/// let json = r#"{
///     "type": "Normal",
///     "mins": {"immediate": 480, "ap": 0, "training": 0, "break": 30, "lunch": 60, "overtime": 0},
///     "shift": {"start": "09:00:00", "end": "17:00:00", "realStart": "09:00:00", "realEnd": "17:00:00"}
/// }"#;
///
/// let record: DayShiftRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.day_type, DayType::Normal);
/// assert_eq!(record.minutes.immediate, 480);
/// assert!(record.window.real_end.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayShiftRecord {
    /// The kind of day.
    #[serde(rename = "type")]
    pub day_type: DayType,
    /// Minutes per activity.
    #[serde(rename = "mins", default)]
    pub minutes: ScheduledMinutes,
    /// The clock window of the day.
    #[serde(rename = "shift", default)]
    pub window: ScheduleWindow,
}

impl DayShiftRecord {
    /// A normal working day with the given activity minutes and no clock window.
    pub fn normal(immediate: i64, ap: i64, training: i64) -> Self {
        Self {
            day_type: DayType::Normal,
            minutes: ScheduledMinutes {
                immediate,
                ap,
                training,
                ..ScheduledMinutes::default()
            },
            window: ScheduleWindow::default(),
        }
    }

    /// A day of the given type with no minutes recorded.
    pub fn of_type(day_type: DayType) -> Self {
        Self {
            day_type,
            minutes: ScheduledMinutes::default(),
            window: ScheduleWindow::default(),
        }
    }

    /// Sets the end of the last worked activity.
    pub fn with_real_end(mut self, real_end: ClockTime) -> Self {
        self.window.real_end = Some(real_end);
        self
    }

    /// Returns true when the schedule already carries overtime minutes.
    pub fn has_recorded_overtime(&self) -> bool {
        self.minutes.overtime != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_type_from_code() {
        assert_eq!(DayType::from("Normal".to_string()), DayType::Normal);
        assert_eq!(DayType::from("Off".to_string()), DayType::Off);
        assert_eq!(
            DayType::from("AEX".to_string()),
            DayType::Exception("AEX".to_string())
        );
    }

    #[test]
    fn test_day_type_serializes_as_code() {
        let json = serde_json::to_string(&DayType::Exception("MEX".to_string())).unwrap();
        assert_eq!(json, "\"MEX\"");
        assert_eq!(serde_json::to_string(&DayType::Off).unwrap(), "\"Off\"");
    }

    #[test]
    fn test_holiday_codes() {
        assert_eq!(HolidayCategory::Aex.code(), "AEX");
        assert_eq!(HolidayCategory::Mex.code(), "MEX");
    }

    #[test]
    fn test_deserialize_day_without_activity() {
        let json = r#"{
            "type": "Normal",
            "mins": {"immediate": 0, "ap": 480, "training": 0, "break": 0, "lunch": 0, "overtime": 0},
            "shift": {"start": "09:00:00", "end": "17:00:00", "realStart": "", "realEnd": ""}
        }"#;
        let record: DayShiftRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.minutes.ap, 480);
        assert!(record.window.real_end.is_none());
        assert_eq!(
            record.window.end,
            Some(ClockTime::from_hms(17, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_exception_day_without_window() {
        let record: DayShiftRecord = serde_json::from_str(r#"{"type": "AEX"}"#).unwrap();
        assert_eq!(record.day_type, DayType::Exception("AEX".to_string()));
        assert_eq!(record.minutes, ScheduledMinutes::default());
    }

    #[test]
    fn test_deserialize_rejects_corrupt_clock() {
        let json = r#"{"type": "Normal", "shift": {"realEnd": "17h00"}}"#;
        let result: Result<DayShiftRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_uses_scraper_keys() {
        let record = DayShiftRecord::normal(480, 0, 0)
            .with_real_end(ClockTime::from_hms(17, 0, 0).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Normal");
        assert_eq!(json["mins"]["immediate"], 480);
        assert_eq!(json["mins"]["break"], 0);
        assert_eq!(json["shift"]["realEnd"], "17:00:00");
        assert_eq!(json["shift"]["realStart"], "");
    }

    #[test]
    fn test_recorded_overtime_flag() {
        let mut record = DayShiftRecord::normal(480, 0, 0);
        assert!(!record.has_recorded_overtime());
        record.minutes.overtime = 15;
        assert!(record.has_recorded_overtime());
    }
}
