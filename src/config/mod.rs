//! Configuration loading and management for the paycheck engine.
//!
//! This module provides functionality to load the rate table, employee
//! profile and engine settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use paycheck_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sample").unwrap();
//! println!("Read timeout: {}ms", config.settings().read_timeout_ms);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_CALL_LOG_OFFSET_MINUTES, DEFAULT_READ_TIMEOUT_MS, EmploymentRates, EngineSettings,
    HolidayMultipliers, LevelRate, RateTable,
};
