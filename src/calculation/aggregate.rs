//! Day aggregation over a date range.
//!
//! Every day in the range is read from the [`RecordStore`] concurrently.
//! Each day folds into its own [`PeriodCounters`] and the per-day results
//! are merged in date order once all reads have finished.

use std::future::Future;

use chrono::NaiveDate;
use futures::future::{join, join_all};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DateRange, DayCallRecord, DayShiftRecord, DayType, PeriodAggregate, PeriodCounters,
    SkipScope, SkippedDay,
};
use crate::store::{RecordStore, calls_key, shift_key};

use super::overtime::reconcile_overtime;

/// The two records stored for one day, each read on its own.
///
/// A failure reading one record does not hide the other.
#[derive(Debug)]
pub struct DayRecords {
    /// The shift record, if any.
    pub shift: EngineResult<Option<DayShiftRecord>>,
    /// The call record, if any.
    pub calls: EngineResult<Option<DayCallRecord>>,
}

/// Folds one day's records into a counters delta.
///
/// - `Normal` days add their immediate, absence and training minutes.
/// - `Off` days add nothing and are never reconciled against calls.
/// - Any other code adds one to that code's day count.
/// - When a non-`Off` shift and a call record are both present and the
///   schedule carries no overtime yet, reconciled overtime is added.
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::day_contribution;
/// use paycheck_engine::config::EngineSettings;
/// use paycheck_engine::models::DayShiftRecord;
///
/// let shift = DayShiftRecord::normal(480, 30, 60);
/// let counters = day_contribution(Some(&shift), None, &EngineSettings::default());
/// assert_eq!(counters.immediate_minutes, 480);
/// assert_eq!(counters.ap_minutes, 30);
/// assert_eq!(counters.training_minutes, 60);
/// ```
pub fn day_contribution(
    shift: Option<&DayShiftRecord>,
    calls: Option<&DayCallRecord>,
    settings: &EngineSettings,
) -> PeriodCounters {
    let mut counters = PeriodCounters::default();

    let Some(shift) = shift else {
        // Calls alone cannot be reconciled without a shift end
        return counters;
    };

    match &shift.day_type {
        DayType::Normal => {
            counters.immediate_minutes += shift.minutes.immediate;
            counters.ap_minutes += shift.minutes.ap;
            counters.training_minutes += shift.minutes.training;
        }
        DayType::Off => return counters,
        DayType::Exception(code) => counters.count_day_type(code),
    }

    if let Some(calls) = calls {
        if !shift.has_recorded_overtime() {
            counters.overtime_minutes +=
                reconcile_overtime(shift, calls, settings.call_log_offset_seconds());
        }
    }

    counters
}

async fn read_bounded<T>(
    read: impl Future<Output = EngineResult<T>>,
    key: String,
    settings: &EngineSettings,
) -> EngineResult<T> {
    timeout(settings.read_timeout(), read)
        .await
        .map_err(|_| EngineError::StoreTimeout {
            key,
            timeout_ms: settings.read_timeout_ms,
        })?
}

/// Reads both records for a day concurrently, each bounded by the settings'
/// read timeout.
pub async fn load_day<S>(store: &S, date: NaiveDate, settings: &EngineSettings) -> DayRecords
where
    S: RecordStore + ?Sized,
{
    let (shift, calls) = join(
        read_bounded(store.get_shift(date), shift_key(date), settings),
        read_bounded(store.get_calls(date), calls_key(date), settings),
    )
    .await;

    DayRecords { shift, calls }
}

/// Aggregates every day in a range, reporting days that could not be read.
///
/// A day whose shift record fails to load contributes nothing. A day whose
/// call log alone fails to load still counts its scheduled minutes but gets
/// no reconciled overtime. Either case is logged and listed in
/// [`PeriodAggregate::skipped_days`] with its [`SkipScope`]; the rest of the
/// range is still counted.
pub async fn aggregate_detailed<S>(
    store: &S,
    range: &DateRange,
    settings: &EngineSettings,
) -> PeriodAggregate
where
    S: RecordStore + ?Sized,
{
    let dates: Vec<NaiveDate> = range.days().collect();
    debug!(
        start = %range.start_date,
        end = %range.end_date,
        days = dates.len(),
        "Aggregating day records"
    );

    let loaded = join_all(dates.iter().map(|&date| load_day(store, date, settings))).await;

    let mut aggregate = PeriodAggregate::default();

    for (date, day) in dates.into_iter().zip(loaded) {
        let shift = match day.shift {
            Ok(shift) => shift,
            Err(err) => {
                warn!(date = %date, error = %err, "Skipping day with unreadable shift record");
                aggregate.skipped_days.push(SkippedDay {
                    date,
                    scope: SkipScope::WholeDay,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let calls = match day.calls {
            Ok(calls) => calls,
            Err(err) => {
                warn!(date = %date, error = %err, "Counting day without its unreadable call log");
                aggregate.skipped_days.push(SkippedDay {
                    date,
                    scope: SkipScope::Overtime,
                    reason: err.to_string(),
                });
                None
            }
        };

        let delta = day_contribution(shift.as_ref(), calls.as_ref(), settings);
        aggregate.counters.merge(&delta);
    }

    aggregate
}

/// Aggregates every day in a range into period counters.
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::aggregate;
/// use paycheck_engine::config::EngineSettings;
/// use paycheck_engine::models::{DateRange, DayShiftRecord};
/// use paycheck_engine::store::MemoryRecordStore;
/// use chrono::NaiveDate;
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let store = MemoryRecordStore::new();
/// let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// store.insert_shift(day, &DayShiftRecord::normal(480, 0, 0)).await.unwrap();
///
/// let counters = aggregate(&store, &DateRange::single(day), &EngineSettings::default()).await;
/// assert_eq!(counters.immediate_minutes, 480);
/// # });
/// ```
pub async fn aggregate<S>(store: &S, range: &DateRange, settings: &EngineSettings) -> PeriodCounters
where
    S: RecordStore + ?Sized,
{
    aggregate_detailed(store, range, settings).await.counters
}
