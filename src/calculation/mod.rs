//! Calculation logic for the paycheck engine.
//!
//! This module contains the fiscal period calculator, the day aggregator,
//! overtime reconciliation against call logs and the paycheck estimator.

mod aggregate;
mod overtime;
mod paycheck;
mod period;

pub use aggregate::{DayRecords, aggregate, aggregate_detailed, day_contribution, load_day};
pub use overtime::{call_overtime_seconds, reconcile_overtime};
pub use paycheck::estimate;
pub use period::{
    FISCAL_YEAR_START_DAY, FISCAL_YEAR_START_MONTH, HISTORY_START, history_start,
    period_of, periods_between, range_of,
};
