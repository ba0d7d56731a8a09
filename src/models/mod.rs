//! Core data models for the paycheck engine.
//!
//! This module contains all the domain models used throughout the engine.

pub mod clock;

mod calls;
mod counters;
mod employee;
mod fiscal_period;
mod paycheck;
mod shift;

pub use calls::{CallEntry, DayCallRecord};
pub use clock::ClockTime;
pub use counters::{PeriodAggregate, PeriodCounters, SkipScope, SkippedDay};
pub use employee::EmployeeProfile;
pub use fiscal_period::{DateRange, FiscalPeriod, PERIODS_PER_FISCAL_YEAR};
pub use paycheck::{BreakdownLine, PaycheckBreakdown, PeriodReport};
pub use shift::{DayShiftRecord, DayType, HolidayCategory, ScheduleWindow, ScheduledMinutes};
