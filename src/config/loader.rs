//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate
//! table, employee profile and engine settings from YAML files.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeProfile;
use crate::store::ConfigStore;

use super::types::{EngineSettings, RateTable};

/// Loads and provides access to paycheck configuration.
///
/// # Directory Structure
///
/// ```text
/// config/sample/
/// ├── rates.yaml     # Rate table per employment type and level
/// ├── profile.yaml   # Employee type, level and hire date
/// └── settings.yaml  # Optional engine settings
/// ```
///
/// # Example
///
/// ```no_run
/// use paycheck_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sample")?;
/// let profile = loader.profile();
/// let rate = loader
///     .rates()
///     .hourly_rate(profile.employment_type()?, &profile.level_key()?)?;
/// println!("Hourly rate: ${}", rate);
/// # Ok::<(), paycheck_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: RateTable,
    profile: EmployeeProfile,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `rates.yaml` or `profile.yaml` is missing or any
    /// file contains invalid YAML. A missing `settings.yaml` falls back to
    /// default settings.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates = Self::load_yaml::<RateTable>(&path.join("rates.yaml"))?;
        let profile = Self::load_yaml::<EmployeeProfile>(&path.join("profile.yaml"))?;

        let settings_path = path.join("settings.yaml");
        let settings = if settings_path.exists() {
            Self::load_yaml::<EngineSettings>(&settings_path)?
        } else {
            debug!(path = %settings_path.display(), "No settings file, using defaults");
            EngineSettings::default()
        };

        Ok(Self::from_parts(rates, profile, settings))
    }

    /// Builds a loader from already-parsed configuration.
    pub fn from_parts(rates: RateTable, profile: EmployeeProfile, settings: EngineSettings) -> Self {
        Self {
            rates,
            profile,
            settings,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the employee profile.
    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

#[async_trait]
impl ConfigStore for ConfigLoader {
    async fn get_rate_table(&self) -> EngineResult<RateTable> {
        Ok(self.rates.clone())
    }

    async fn get_employee_profile(&self) -> EngineResult<EmployeeProfile> {
        Ok(self.profile.clone())
    }
}
