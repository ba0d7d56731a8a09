//! Error types for the paycheck engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while deriving periods,
//! aggregating day records and estimating a paycheck.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the paycheck engine.
///
/// # Example
///
/// ```
/// use paycheck_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee profile is missing a field the estimate depends on.
    #[error("Employee profile incomplete: '{field}' is not set")]
    ProfileIncomplete {
        /// The profile field that is missing.
        field: String,
    },

    /// The rate table has no entry for the employee's type and level.
    #[error("Rate not found for employment type '{employment_type}' at level '{level}'")]
    RateNotFound {
        /// The employment type that was looked up.
        employment_type: String,
        /// The level that was looked up.
        level: String,
    },

    /// A fiscal period number outside the fiscal year.
    #[error("Invalid fiscal period {period}: must be between 1 and 24")]
    InvalidPeriod {
        /// The rejected period number.
        period: u32,
    },

    /// A date range whose start falls after its end.
    #[error("Invalid date range: {start_date} is after {end_date}")]
    InvalidDateRange {
        /// The first date of the rejected range.
        start_date: NaiveDate,
        /// The last date of the rejected range.
        end_date: NaiveDate,
    },

    /// A clock time string could not be parsed.
    #[error("Invalid clock time '{value}'")]
    InvalidClockTime {
        /// The raw value.
        value: String,
    },

    /// A stored day record could not be decoded.
    #[error("Malformed record '{key}': {message}")]
    MalformedRecord {
        /// The storage key of the record.
        key: String,
        /// A description of the decode failure.
        message: String,
    },

    /// The record store failed to serve a read.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },

    /// A record store read did not complete in time.
    #[error("Storage read for '{key}' timed out after {timeout_ms}ms")]
    StoreTimeout {
        /// The storage key being read.
        key: String,
        /// The timeout that elapsed.
        timeout_ms: u64,
    },
}

impl EngineError {
    /// Returns true when the error means "not configured" rather than a failure.
    ///
    /// Callers use this to show a setup prompt instead of an estimate.
    pub fn is_not_configured(&self) -> bool {
        matches!(
            self,
            EngineError::ProfileIncomplete { .. } | EngineError::RateNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
