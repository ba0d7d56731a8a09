//! Paycheck estimation from period counters.
//!
//! Minute counters become hours, hours are priced from the rate table and
//! the lines are combined into a grand total. No rounding is applied; values
//! are rounded only where they are displayed.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    BreakdownLine, EmployeeProfile, HolidayCategory, PaycheckBreakdown, PeriodCounters,
};

fn minutes_to_hours(minutes: Decimal) -> Decimal {
    minutes / Decimal::from(60)
}

/// Estimates the paycheck for a period's counters.
///
/// Schedule hours include absence minutes, and the absence line is then
/// subtracted from both the grand total and the total hours. Holiday lines
/// price a day count at a flat daily rate: their `hours` field is the
/// number of days of that category.
///
/// # Errors
///
/// - [`EngineError::ProfileIncomplete`] if the profile has no employment
///   type or level
/// - [`EngineError::RateNotFound`] if the rate table has no entry for them
///
/// [`EngineError::ProfileIncomplete`]: crate::error::EngineError::ProfileIncomplete
/// [`EngineError::RateNotFound`]: crate::error::EngineError::RateNotFound
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::estimate;
/// use paycheck_engine::config::{EmploymentRates, LevelRate, RateTable};
/// use paycheck_engine::models::{EmployeeProfile, PeriodCounters};
/// use rust_decimal::Decimal;
///
/// let mut rates = RateTable::default();
/// let mut employment = EmploymentRates::default();
/// employment
///     .levels
///     .insert("L2".to_string(), LevelRate { rate: Decimal::from(100) });
/// rates.employment_types.insert("A".to_string(), employment);
///
/// let counters = PeriodCounters {
///     immediate_minutes: 480,
///     ..PeriodCounters::default()
/// };
///
/// let breakdown = estimate(&counters, &rates, &EmployeeProfile::new("A", "2")).unwrap();
/// assert_eq!(breakdown.schedule.subtotal, Decimal::from(800));
/// assert_eq!(breakdown.grand_total, Decimal::from(800));
/// ```
pub fn estimate(
    counters: &PeriodCounters,
    rates: &RateTable,
    profile: &EmployeeProfile,
) -> EngineResult<PaycheckBreakdown> {
    let employment_type = profile.employment_type()?;
    let level_key = profile.level_key()?;
    let rate = rates.hourly_rate(employment_type, &level_key)?;

    let schedule_minutes =
        counters.immediate_minutes + counters.training_minutes + counters.ap_minutes;
    let schedule_hours = minutes_to_hours(Decimal::from(schedule_minutes));
    let overtime_hours = minutes_to_hours(counters.overtime_minutes);
    let ap_hours = minutes_to_hours(Decimal::from(counters.ap_minutes));

    let holiday_line = |category: HolidayCategory| -> EngineResult<BreakdownLine> {
        let days = Decimal::from(counters.category_count(category.code()));
        Ok(BreakdownLine::new(
            rates.holiday_rate(employment_type, category)?,
            days,
        ))
    };

    let schedule = BreakdownLine::new(rate, schedule_hours);
    let [aex, mex] = HolidayCategory::ALL.map(holiday_line);
    let (aex, mex) = (aex?, mex?);
    let overtime = BreakdownLine::new(rate, overtime_hours);
    let ap = BreakdownLine::new(rate, ap_hours);

    let grand_total =
        schedule.subtotal + aex.subtotal + mex.subtotal + overtime.subtotal - ap.subtotal;
    let total_hours = schedule_hours + overtime_hours - ap_hours;

    debug!(
        employment_type = %employment_type,
        level = %level_key,
        rate = %rate,
        grand_total = %grand_total,
        "Estimated paycheck"
    );

    Ok(PaycheckBreakdown {
        schedule,
        aex,
        mex,
        overtime,
        ap,
        grand_total,
        total_hours,
    })
}
