//! Paycheck breakdown and period report models.
//!
//! This module contains the [`PaycheckBreakdown`] produced by the estimator
//! and the [`PeriodReport`] that pairs it with the period and counters it
//! was computed from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DateRange, FiscalPeriod, HolidayCategory, PeriodCounters, SkippedDay};

/// One category of the paycheck.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::BreakdownLine;
/// use rust_decimal::Decimal;
///
/// let line = BreakdownLine::new(Decimal::from(100), Decimal::from(8));
/// assert_eq!(line.subtotal, Decimal::from(800));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    /// The rate applied to the category.
    pub rate: Decimal,
    /// Hours in the category. Holiday categories carry a day count here.
    pub hours: Decimal,
    /// `rate * hours`, unrounded.
    pub subtotal: Decimal,
}

impl BreakdownLine {
    /// Creates a line with its subtotal.
    pub fn new(rate: Decimal, hours: Decimal) -> Self {
        Self {
            rate,
            hours,
            subtotal: rate * hours,
        }
    }
}

/// The estimated paycheck for one set of period counters.
///
/// Amounts are not rounded; rounding to cents is left to whatever displays
/// the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckBreakdown {
    /// Scheduled time (immediate + training + absence).
    pub schedule: BreakdownLine,
    /// `AEX` holiday days at the flat holiday rate.
    pub aex: BreakdownLine,
    /// `MEX` holiday days at the flat holiday rate.
    pub mex: BreakdownLine,
    /// Inferred overtime.
    pub overtime: BreakdownLine,
    /// Absence time, deducted from the total.
    pub ap: BreakdownLine,
    /// `schedule + aex + mex + overtime - ap`.
    pub grand_total: Decimal,
    /// `schedule + overtime - ap` hours.
    pub total_hours: Decimal,
}

impl PaycheckBreakdown {
    /// The line for one holiday category.
    pub fn holiday(&self, category: HolidayCategory) -> &BreakdownLine {
        match category {
            HolidayCategory::Aex => &self.aex,
            HolidayCategory::Mex => &self.mex,
        }
    }
}

/// The full estimate for one fiscal period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The period reported on.
    pub period: FiscalPeriod,
    /// The dates the period covers.
    pub range: DateRange,
    /// Counters aggregated over the range.
    pub counters: PeriodCounters,
    /// The estimated paycheck.
    pub breakdown: PaycheckBreakdown,
    /// Days left out because their records could not be read.
    pub skipped_days: Vec<SkippedDay>,
}
