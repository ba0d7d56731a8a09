//! Storage seams for day records and configuration.
//!
//! The engine reads through these traits only. Browser storage, scraping
//! and file import live behind them in other components.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{DayCallRecord, DayShiftRecord, EmployeeProfile};

pub use memory::MemoryRecordStore;

/// Date format used in storage keys.
pub const STORAGE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Storage key of the shift record for a date, e.g. `shift-16-12-2023`.
pub fn shift_key(date: NaiveDate) -> String {
    format!("shift-{}", date.format(STORAGE_DATE_FORMAT))
}

/// Storage key of the call record for a date, e.g. `rec-16-12-2023`.
pub fn calls_key(date: NaiveDate) -> String {
    format!("rec-{}", date.format(STORAGE_DATE_FORMAT))
}

/// Read access to per-day shift and call records.
///
/// `Ok(None)` means nothing was stored for the date.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The shift record for a date.
    async fn get_shift(&self, date: NaiveDate) -> EngineResult<Option<DayShiftRecord>>;

    /// The call record for a date.
    async fn get_calls(&self, date: NaiveDate) -> EngineResult<Option<DayCallRecord>>;
}

/// Read access to the rate table and employee profile.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The current rate table.
    async fn get_rate_table(&self) -> EngineResult<RateTable>;

    /// The current employee profile.
    async fn get_employee_profile(&self) -> EngineResult<EmployeeProfile>;
}
