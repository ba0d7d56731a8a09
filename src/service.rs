//! End-to-end paycheck reports.
//!
//! [`PaycheckService`] ties the stores to the calculators: it resolves a
//! fiscal period to its dates, aggregates the stored day records and prices
//! the result with the configured rates.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_detailed, estimate, history_start, period_of, periods_between, range_of,
};
use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{FiscalPeriod, PeriodReport};
use crate::store::{ConfigStore, RecordStore};

/// Produces paycheck reports from a record store and a config store.
///
/// Every report is recomputed from the stores; nothing is cached between
/// calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use paycheck_engine::config::ConfigLoader;
/// use paycheck_engine::models::{DayShiftRecord, FiscalPeriod};
/// use paycheck_engine::service::PaycheckService;
/// use paycheck_engine::store::MemoryRecordStore;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let config = ConfigLoader::load("./config/sample").unwrap();
/// let settings = config.settings().clone();
/// let records = MemoryRecordStore::new();
/// let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// records.insert_shift(day, &DayShiftRecord::normal(480, 0, 0)).await.unwrap();
///
/// let service = PaycheckService::new(Arc::new(records), Arc::new(config), settings);
/// let report = service.report(FiscalPeriod::new(2, 2024).unwrap()).await.unwrap();
/// assert_eq!(report.breakdown.grand_total, Decimal::from(800));
/// # });
/// ```
#[derive(Debug)]
pub struct PaycheckService<R: ?Sized, C: ?Sized> {
    records: Arc<R>,
    config: Arc<C>,
    settings: EngineSettings,
}

impl<R: ?Sized, C: ?Sized> Clone for PaycheckService<R, C> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            config: Arc::clone(&self.config),
            settings: self.settings.clone(),
        }
    }
}

impl<R, C> PaycheckService<R, C>
where
    R: RecordStore + ?Sized,
    C: ConfigStore + ?Sized,
{
    /// Creates a new service over the given stores.
    pub fn new(records: Arc<R>, config: Arc<C>, settings: EngineSettings) -> Self {
        Self {
            records,
            config,
            settings,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Builds the report for one fiscal period.
    ///
    /// The profile is checked before any day record is read, so an
    /// unconfigured employee fails fast with an error for which
    /// [`EngineError::is_not_configured`] is true. Days whose records cannot
    /// be read are listed in the report's `skipped_days` and do not fail it.
    ///
    /// [`EngineError::is_not_configured`]: crate::error::EngineError::is_not_configured
    pub async fn report(&self, period: FiscalPeriod) -> EngineResult<PeriodReport> {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, period = %period, "Building period report");

        let start_time = Instant::now();
        match self.build_report(correlation_id, period).await {
            Ok(report) => {
                let duration = start_time.elapsed();
                info!(
                    correlation_id = %correlation_id,
                    period = %period,
                    skipped_days = report.skipped_days.len(),
                    grand_total = %report.breakdown.grand_total,
                    duration_us = duration.as_micros(),
                    "Period report completed successfully"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    period = %period,
                    error = %err,
                    "Period report failed"
                );
                Err(err)
            }
        }
    }

    /// Builds the report for the period containing `today`.
    pub async fn current_report(&self, today: NaiveDate) -> EngineResult<PeriodReport> {
        self.report(period_of(today)).await
    }

    /// Lists the periods from the start of the employee's history through
    /// the period containing `today`, oldest first.
    pub async fn available_periods(&self, today: NaiveDate) -> EngineResult<Vec<FiscalPeriod>> {
        let profile = self.config.get_employee_profile().await?;
        Ok(periods_between(history_start(profile.hire_date), today))
    }

    async fn build_report(
        &self,
        correlation_id: Uuid,
        period: FiscalPeriod,
    ) -> EngineResult<PeriodReport> {
        let profile = self.config.get_employee_profile().await?;
        profile.employment_type()?;
        profile.level_key()?;
        let rates = self.config.get_rate_table().await?;

        let range = range_of(&period)?;
        let aggregate = aggregate_detailed(self.records.as_ref(), &range, &self.settings).await;
        let breakdown = estimate(&aggregate.counters, &rates, &profile)?;

        Ok(PeriodReport {
            report_id: correlation_id,
            generated_at: Utc::now(),
            period,
            range,
            counters: aggregate.counters,
            breakdown,
            skipped_days: aggregate.skipped_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
    use crate::models::{CallEntry, DayCallRecord, DayShiftRecord, DayType, EmployeeProfile};
    use crate::store::MemoryRecordStore;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_config() -> ConfigLoader {
        ConfigLoader::load("./config/sample").unwrap()
    }

    fn service_with(
        records: MemoryRecordStore,
        config: ConfigLoader,
    ) -> PaycheckService<MemoryRecordStore, ConfigLoader> {
        let settings = config.settings().clone();
        PaycheckService::new(Arc::new(records), Arc::new(config), settings)
    }

    #[tokio::test]
    async fn test_report_for_empty_period() {
        let service = service_with(MemoryRecordStore::new(), sample_config());
        let report = service.report(FiscalPeriod::new(2, 2024).unwrap()).await.unwrap();

        assert_eq!(report.range.start_date, date(2024, 1, 1));
        assert_eq!(report.range.end_date, date(2024, 1, 15));
        assert!(report.counters.is_zero());
        assert_eq!(report.breakdown.grand_total, Decimal::ZERO);
        assert!(report.skipped_days.is_empty());
    }

    #[tokio::test]
    async fn test_report_prices_scheduled_and_overtime_minutes() {
        let records = MemoryRecordStore::new();
        let day = date(2024, 1, 3);
        records
            .insert_shift(
                day,
                &DayShiftRecord::normal(480, 0, 0).with_real_end("17:00:00".parse().unwrap()),
            )
            .await
            .unwrap();
        // 17:00-17:30 once corrected by the sample offset
        records
            .insert_calls(
                day,
                &DayCallRecord::from_calls([CallEntry::new(
                    "19:00:00".parse().unwrap(),
                    "19:30:00".parse().unwrap(),
                    1800,
                )]),
            )
            .await
            .unwrap();

        let service = service_with(records, sample_config());
        let report = service.report(FiscalPeriod::new(2, 2024).unwrap()).await.unwrap();

        assert_eq!(report.counters.overtime_minutes, dec("30"));
        assert_eq!(report.breakdown.schedule.subtotal, dec("800"));
        assert_eq!(report.breakdown.overtime.subtotal, dec("50"));
        assert_eq!(report.breakdown.grand_total, dec("850"));
        assert_eq!(report.breakdown.total_hours, dec("8.5"));
    }

    #[tokio::test]
    async fn test_current_report_uses_period_of_today() {
        let records = MemoryRecordStore::new();
        records
            .insert_shift(
                date(2024, 1, 20),
                &DayShiftRecord::of_type(DayType::Exception("AEX".to_string())),
            )
            .await
            .unwrap();

        let service = service_with(records, sample_config());
        let report = service.current_report(date(2024, 1, 25)).await.unwrap();

        assert_eq!(report.period, FiscalPeriod::new(3, 2024).unwrap());
        assert_eq!(report.counters.category_count("AEX"), 1);
        // reported 80.00 * aex 2 for one day
        assert_eq!(report.breakdown.aex.subtotal, dec("160"));
    }

    #[tokio::test]
    async fn test_reports_have_distinct_ids() {
        let service = service_with(MemoryRecordStore::new(), sample_config());
        let period = FiscalPeriod::new(2, 2024).unwrap();
        let first = service.report(period).await.unwrap();
        let second = service.report(period).await.unwrap();
        assert_ne!(first.report_id, second.report_id);
    }

    #[tokio::test]
    async fn test_available_periods_start_at_hire_date() {
        let service = service_with(MemoryRecordStore::new(), sample_config());
        // Sample hire date is 2023-03-06, in period 6 of 2023
        let periods = service.available_periods(date(2023, 4, 20)).await.unwrap();

        assert_eq!(periods.first(), Some(&FiscalPeriod::new(6, 2023).unwrap()));
        assert_eq!(periods.last(), Some(&FiscalPeriod::new(9, 2023).unwrap()));
        assert_eq!(periods.len(), 4);
    }

    struct CountingStore {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl RecordStore for CountingStore {
        async fn get_shift(&self, _date: NaiveDate) -> EngineResult<Option<DayShiftRecord>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn get_calls(&self, _date: NaiveDate) -> EngineResult<Option<DayCallRecord>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_incomplete_profile_fails_before_reading_records() {
        let sample = sample_config();
        let config = ConfigLoader::from_parts(
            sample.rates().clone(),
            EmployeeProfile::default(),
            sample.settings().clone(),
        );
        let records = Arc::new(CountingStore {
            reads: AtomicUsize::new(0),
        });
        let service = PaycheckService::new(
            Arc::clone(&records),
            Arc::new(config),
            EngineSettings::default(),
        );

        let err = service
            .report(FiscalPeriod::new(2, 2024).unwrap())
            .await
            .unwrap_err();

        assert!(err.is_not_configured());
        assert!(matches!(err, EngineError::ProfileIncomplete { .. }));
        assert_eq!(records.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_level_is_not_configured() {
        let sample = sample_config();
        let config = ConfigLoader::from_parts(
            sample.rates().clone(),
            EmployeeProfile::new("B", "7"),
            sample.settings().clone(),
        );
        let service = service_with(MemoryRecordStore::new(), config);

        let err = service
            .report(FiscalPeriod::new(2, 2024).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::RateNotFound { .. }));
    }

    #[tokio::test]
    async fn test_service_works_through_trait_objects() {
        let records: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
        let config: Arc<dyn ConfigStore> = Arc::new(sample_config());
        let service = PaycheckService::new(records, config, EngineSettings::default());

        let report = service.current_report(date(2024, 2, 1)).await.unwrap();
        assert_eq!(report.period, FiscalPeriod::new(4, 2024).unwrap());
    }
}
