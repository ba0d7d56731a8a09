//! Call log records.

use serde::{Deserialize, Serialize};

use super::clock::ClockTime;

/// A single logged call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEntry {
    /// Clock time the call started, in the call log's timezone.
    pub start_time: ClockTime,
    /// Clock time the call ended, in the call log's timezone.
    pub end_time: ClockTime,
    /// Call length in whole seconds.
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    /// Whether a report was filed for the call.
    #[serde(rename = "report", default)]
    pub reported: bool,
}

impl CallEntry {
    /// Creates an unreported call.
    pub fn new(start_time: ClockTime, end_time: ClockTime, duration_seconds: u64) -> Self {
        Self {
            start_time,
            end_time,
            duration_seconds,
            reported: false,
        }
    }

    fn same_call(&self, other: &CallEntry) -> bool {
        self.duration_seconds == other.duration_seconds
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }
}

/// All calls logged on one calendar day, with running aggregates.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::{CallEntry, DayCallRecord};
///
/// let mut record = DayCallRecord::default();
/// record.add_call(CallEntry::new("10:00:00".parse().unwrap(), "10:05:00".parse().unwrap(), 300));
/// record.add_call(CallEntry::new("11:00:00".parse().unwrap(), "11:01:40".parse().unwrap(), 100));
///
/// assert_eq!(record.total_duration, 400);
/// assert_eq!(record.highest_duration, 300);
/// assert_eq!(record.lowest_duration, 100);
/// assert_eq!(record.average_duration, 200);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCallRecord {
    /// Calls in the order they were logged.
    #[serde(default)]
    pub calls: Vec<CallEntry>,
    /// Sum of all call durations, in seconds.
    #[serde(default, with = "hms_seconds")]
    pub total_duration: u64,
    /// Longest call, in seconds.
    #[serde(default, with = "hms_seconds")]
    pub highest_duration: u64,
    /// Shortest call, in seconds.
    #[serde(default, with = "hms_seconds")]
    pub lowest_duration: u64,
    /// Floored mean call duration, in seconds.
    #[serde(rename = "avgDuration", default, with = "hms_seconds")]
    pub average_duration: u64,
    /// Seconds between the end of each call and the start of the next.
    #[serde(default)]
    pub available_time: i64,
    /// Number of reported calls.
    #[serde(rename = "reports", default)]
    pub reports_count: u32,
}

impl DayCallRecord {
    /// Builds a record from a list of calls.
    pub fn from_calls(calls: impl IntoIterator<Item = CallEntry>) -> Self {
        let mut record = Self::default();
        for call in calls {
            record.add_call(call);
        }
        record
    }

    /// Adds a call and updates the aggregates.
    ///
    /// A call matching an existing one on duration, start and end is not
    /// added again; only its reported flag is refreshed.
    pub fn add_call(&mut self, call: CallEntry) {
        if let Some(existing) = self.calls.iter_mut().find(|c| c.same_call(&call)) {
            if existing.reported != call.reported {
                existing.reported = call.reported;
                if call.reported {
                    self.reports_count += 1;
                } else {
                    self.reports_count = self.reports_count.saturating_sub(1);
                }
            }
            return;
        }

        if call.reported {
            self.reports_count += 1;
        }
        if let Some(previous) = self.calls.last() {
            self.available_time += i64::from(call.start_time.seconds_from_midnight())
                - i64::from(previous.end_time.seconds_from_midnight());
        }
        self.total_duration += call.duration_seconds;
        self.highest_duration = self.highest_duration.max(call.duration_seconds);
        self.lowest_duration = if self.calls.is_empty() {
            call.duration_seconds
        } else {
            self.lowest_duration.min(call.duration_seconds)
        };
        self.calls.push(call);
        self.average_duration = self.total_duration / self.calls.len() as u64;
    }

    /// Returns true when no calls were logged.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Serde helpers for duration aggregates.
///
/// The scraper writes aggregates as `HH:MM:SS` strings; older records hold
/// plain seconds. Both are read, and strings are written back.
mod hms_seconds {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(seconds: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            seconds / 60 % 60,
            seconds % 60
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Seconds(seconds) => Ok(seconds),
            Raw::Text(text) => parse(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid duration `{text}`, expected HH:MM:SS"))
            }),
        }
    }

    pub(super) fn parse(raw: &str) -> Option<u64> {
        let mut parts = raw.trim().split(':');
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        let seconds: u64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(hours * 3600 + minutes * 60 + seconds)
    }
}
