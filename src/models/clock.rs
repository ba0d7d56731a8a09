//! Time-of-day values as written by the schedule scraper.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

const SECONDS_PER_HOUR: u32 = 3_600;

/// A clock time with no date, stored as seconds after midnight.
///
/// The scraper writes times on a 1-24 hour clock, so `"24:00:00"` is
/// accepted and sorts after `"23:59:59"`.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::ClockTime;
///
/// let end: ClockTime = "17:00:00".parse().unwrap();
/// assert_eq!(end.seconds_from_midnight(), 17 * 3600);
/// assert_eq!(end.to_string(), "17:00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Creates a clock time from hours, minutes and seconds.
    ///
    /// Returns `None` when the time is past `24:00:00`.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 24 || minute > 59 || second > 59 {
            return None;
        }
        let total = hour * SECONDS_PER_HOUR + minute * 60 + second;
        (total <= 24 * SECONDS_PER_HOUR).then_some(Self(total))
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidClockTime {
            value: s.to_string(),
        };
        let trimmed = s.trim();

        // chrono has no hour 24, so midnight-at-end-of-day is handled here
        if let Some(rest) = trimmed.strip_prefix("24:") {
            return match rest {
                "00" | "00:00" => Ok(Self(24 * SECONDS_PER_HOUR)),
                _ => Err(invalid()),
            };
        }

        let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| invalid())?;

        Ok(Self(time.num_seconds_from_midnight()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / 60;
        let seconds = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde helpers for clock times the scraper leaves as `""` when unrecorded.
pub mod optional {
    use super::ClockTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes `None` back as an empty string.
    pub fn serialize<S: Serializer>(
        value: &Option<ClockTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.collect_str(time),
            None => serializer.serialize_str(""),
        }
    }

    /// Reads an empty or missing string as `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ClockTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours_minutes_seconds() {
        let time: ClockTime = "09:05:30".parse().unwrap();
        assert_eq!(time.seconds_from_midnight(), 9 * 3600 + 5 * 60 + 30);
    }

    #[test]
    fn test_parse_without_seconds() {
        let time: ClockTime = "17:20".parse().unwrap();
        assert_eq!(time, ClockTime::from_hms(17, 20, 0).unwrap());
    }

    #[test]
    fn test_parse_single_digit_hour() {
        let time: ClockTime = "7:00:00".parse().unwrap();
        assert_eq!(time, ClockTime::from_hms(7, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_hour_24() {
        let time: ClockTime = "24:00:00".parse().unwrap();
        assert_eq!(time.seconds_from_midnight(), 86_400);
        assert!(time > "23:59:59".parse::<ClockTime>().unwrap());
    }

    #[test]
    fn test_parse_hour_24_past_midnight_rejected() {
        assert!("24:30:00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_parse_garbage_rejected() {
        let result = "half past five".parse::<ClockTime>();
        match result {
            Err(EngineError::InvalidClockTime { value }) => assert_eq!(value, "half past five"),
            other => panic!("Expected InvalidClockTime, got {:?}", other),
        }
    }

    #[test]
    fn test_display_pads_fields() {
        let time = ClockTime::from_hms(7, 5, 9).unwrap();
        assert_eq!(time.to_string(), "07:05:09");
    }

    #[test]
    fn test_from_hms_rejects_out_of_range() {
        assert!(ClockTime::from_hms(24, 0, 1).is_none());
        assert!(ClockTime::from_hms(10, 60, 0).is_none());
    }

    #[test]
    fn test_serde_as_string() {
        let time = ClockTime::from_hms(17, 0, 0).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"17:00:00\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct Window {
        #[serde(default, with = "optional")]
        end: Option<ClockTime>,
    }

    #[test]
    fn test_optional_empty_string_is_none() {
        let window: Window = serde_json::from_str(r#"{"end": ""}"#).unwrap();
        assert!(window.end.is_none());
        let missing: Window = serde_json::from_str("{}").unwrap();
        assert!(missing.end.is_none());
        assert_eq!(serde_json::to_string(&window).unwrap(), r#"{"end":""}"#);
    }

    #[test]
    fn test_optional_bad_value_is_error() {
        let result: Result<Window, _> = serde_json::from_str(r#"{"end": "5pm"}"#);
        assert!(result.is_err());
    }
}
