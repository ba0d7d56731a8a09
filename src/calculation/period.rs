//! Fiscal period calculation.
//!
//! Maps calendar dates to semi-monthly fiscal periods and back. The fiscal
//! year starts on 16 December; the fiscal year label is the calendar year
//! the fiscal year ends in.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, FiscalPeriod, PERIODS_PER_FISCAL_YEAR};

/// Month of the fiscal-year anchor.
pub const FISCAL_YEAR_START_MONTH: u32 = 12;

/// Day of month of the fiscal-year anchor, and of every second-half period.
pub const FISCAL_YEAR_START_DAY: u32 = 16;

/// Earliest date period history goes back to.
pub const HISTORY_START: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(date) => date,
    None => panic!("invalid history start"),
};

/// Gets the fiscal period a date belongs to.
///
/// Days 16 to end of month open a new period; days 1 to 15 close the
/// month-slot that began on the previous 16th.
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::period_of;
/// use chrono::NaiveDate;
///
/// // The anchor day opens period 1 of the next fiscal year
/// let first = period_of(NaiveDate::from_ymd_opt(2023, 12, 16).unwrap());
/// assert_eq!((first.period_number, first.fiscal_year), (1, 2024));
///
/// // The day before closes period 24 of the current one
/// let last = period_of(NaiveDate::from_ymd_opt(2023, 12, 15).unwrap());
/// assert_eq!((last.period_number, last.fiscal_year), (24, 2023));
/// ```
pub fn period_of(date: NaiveDate) -> FiscalPeriod {
    let year = date.year();
    let on_or_after_anchor =
        (date.month(), date.day()) >= (FISCAL_YEAR_START_MONTH, FISCAL_YEAR_START_DAY);

    let (anchor_year, fiscal_year) = if on_or_after_anchor {
        (year, year + 1)
    } else {
        (year - 1, year)
    };

    let second_half = date.day() >= FISCAL_YEAR_START_DAY;

    // Whole months since the anchor; every month has a 16th, so a month is
    // complete exactly when the day has reached the 16th
    let month_index = year * 12 + date.month0() as i32;
    let anchor_index = anchor_year * 12 + (FISCAL_YEAR_START_MONTH - 1) as i32;
    let months = month_index - anchor_index - if second_half { 0 } else { 1 };

    let offset = if second_half { 0 } else { 1 };

    FiscalPeriod {
        fiscal_year,
        period_number: (months * 2 + 1 + offset) as u32,
    }
}

/// Gets the inclusive date range of a fiscal period.
///
/// Odd periods run from the 16th to the last day of a month, even periods
/// from the 1st to the 15th. A period number outside `1..=24` is rejected
/// with [`EngineError::InvalidPeriod`].
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::range_of;
/// use paycheck_engine::models::FiscalPeriod;
/// use chrono::NaiveDate;
///
/// let range = range_of(&FiscalPeriod::new(5, 2024).unwrap()).unwrap();
/// assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
/// assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn range_of(period: &FiscalPeriod) -> EngineResult<DateRange> {
    let out_of_range = || EngineError::InvalidPeriod {
        period: period.period_number,
    };

    if period.period_number == 0 || period.period_number > PERIODS_PER_FISCAL_YEAR {
        return Err(out_of_range());
    }

    let anchor = NaiveDate::from_ymd_opt(
        period.fiscal_year - 1,
        FISCAL_YEAR_START_MONTH,
        FISCAL_YEAR_START_DAY,
    )
    .ok_or_else(out_of_range)?;

    let slot = anchor
        .checked_add_months(Months::new(period.period_number / 2))
        .ok_or_else(out_of_range)?;
    let first_of_month = slot.with_day(1).ok_or_else(out_of_range)?;

    let (start_date, end_date) = if period.period_number % 2 == 0 {
        let end = slot.with_day(FISCAL_YEAR_START_DAY - 1).ok_or_else(out_of_range)?;
        (first_of_month, end)
    } else {
        let start = slot.with_day(FISCAL_YEAR_START_DAY).ok_or_else(out_of_range)?;
        let end = first_of_month
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;
        (start, end)
    };

    DateRange::new(start_date, end_date).ok_or_else(out_of_range)
}

/// Lists every period from the one containing `since` through the one
/// containing `today`, oldest first.
///
/// Returns an empty list when `since` is after `today`.
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::periods_between;
/// use chrono::NaiveDate;
///
/// let periods = periods_between(
///     NaiveDate::from_ymd_opt(2023, 12, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
/// );
/// let labels: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
/// assert_eq!(labels, vec!["Period 24 - 2023", "Period 1 - 2024", "Period 2 - 2024"]);
/// ```
pub fn periods_between(since: NaiveDate, today: NaiveDate) -> Vec<FiscalPeriod> {
    if since > today {
        return Vec::new();
    }

    let last = period_of(today);
    let mut current = period_of(since);
    let mut periods = Vec::new();
    while current <= last {
        periods.push(current);
        current = current.next();
    }
    periods
}

/// The date period history starts from: the hire date, unless it is
/// before [`HISTORY_START`].
pub fn history_start(hire_date: Option<NaiveDate>) -> NaiveDate {
    match hire_date {
        Some(hired) if hired > HISTORY_START => hired,
        _ => HISTORY_START,
    }
}
