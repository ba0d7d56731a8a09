//! Fiscal pay-period and date range models.
//!
//! A fiscal year holds 24 semi-monthly periods. Period 1 is the half-month
//! starting on the fiscal-year anchor (16 December), period 2 is 1-15
//! January, and so on through period 24 (1-15 December).

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of semi-monthly periods in one fiscal year.
pub const PERIODS_PER_FISCAL_YEAR: u32 = 24;

/// Identifies one semi-monthly pay period.
///
/// Ordering is by fiscal year, then period number, so periods sort
/// chronologically.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::FiscalPeriod;
///
/// let period = FiscalPeriod::new(24, 2024).unwrap();
/// assert_eq!(period.next(), FiscalPeriod::new(1, 2025).unwrap());
/// assert!(FiscalPeriod::new(0, 2024).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFiscalPeriod")]
pub struct FiscalPeriod {
    /// The fiscal year label (the calendar year in which the fiscal year ends).
    pub fiscal_year: i32,
    /// The period number within the fiscal year, 1 through 24.
    pub period_number: u32,
}

impl FiscalPeriod {
    /// Creates a period, rejecting numbers outside `1..=24`.
    pub fn new(period_number: u32, fiscal_year: i32) -> EngineResult<Self> {
        if period_number == 0 || period_number > PERIODS_PER_FISCAL_YEAR {
            return Err(EngineError::InvalidPeriod {
                period: period_number,
            });
        }
        Ok(Self {
            fiscal_year,
            period_number,
        })
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Self {
        if self.period_number >= PERIODS_PER_FISCAL_YEAR {
            Self {
                fiscal_year: self.fiscal_year + 1,
                period_number: 1,
            }
        } else {
            Self {
                fiscal_year: self.fiscal_year,
                period_number: self.period_number + 1,
            }
        }
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        if self.period_number <= 1 {
            Self {
                fiscal_year: self.fiscal_year - 1,
                period_number: PERIODS_PER_FISCAL_YEAR,
            }
        } else {
            Self {
                fiscal_year: self.fiscal_year,
                period_number: self.period_number - 1,
            }
        }
    }
}

#[derive(Deserialize)]
struct RawFiscalPeriod {
    fiscal_year: i32,
    period_number: u32,
}

impl TryFrom<RawFiscalPeriod> for FiscalPeriod {
    type Error = EngineError;

    fn try_from(raw: RawFiscalPeriod) -> EngineResult<Self> {
        Self::new(raw.period_number, raw.fiscal_year)
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period {} - {}", self.period_number, self.fiscal_year)
    }
}

/// An inclusive range of calendar dates.
///
/// Deserializing rejects a start after the end. A range built by hand with
/// its fields inverted is treated as empty.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
/// ).unwrap();
///
/// assert_eq!(range.len_days(), 15);
/// assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    /// The first date of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the range (inclusive).
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawDateRange) -> EngineResult<Self> {
        Self::new(raw.start_date, raw.end_date).ok_or(EngineError::InvalidDateRange {
            start_date: raw.start_date,
            end_date: raw.end_date,
        })
    }
}

impl DateRange {
    /// Creates a range, returning `None` when `start_date > end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        (start_date <= end_date).then_some(Self {
            start_date,
            end_date,
        })
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Checks if a date falls within the range, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// The number of days in the range, zero when the ends are inverted.
    pub fn len_days(&self) -> u64 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u64::try_from(days).unwrap_or(0)
    }

    /// Iterates every date in the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len_days())
            .filter_map(move |offset| self.start_date.checked_add_days(Days::new(offset)))
    }
}
