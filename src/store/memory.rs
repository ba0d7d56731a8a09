//! In-memory record store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayCallRecord, DayShiftRecord};

use super::{RecordStore, calls_key, shift_key};

/// A [`RecordStore`] holding raw JSON values under browser-storage keys.
///
/// Values are decoded on read, so a corrupt stored value surfaces as
/// [`EngineError::MalformedRecord`] for that one key.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::DayShiftRecord;
/// use paycheck_engine::store::{MemoryRecordStore, RecordStore};
/// use chrono::NaiveDate;
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let store = MemoryRecordStore::new();
/// let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// store.insert_shift(date, &DayShiftRecord::normal(480, 0, 0)).await.unwrap();
///
/// let shift = store.get_shift(date).await.unwrap().unwrap();
/// assert_eq!(shift.minutes.immediate, 480);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    data: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the shift record for a date.
    pub async fn insert_shift(&self, date: NaiveDate, record: &DayShiftRecord) -> EngineResult<()> {
        self.insert_value(shift_key(date), record).await
    }

    /// Stores the call record for a date.
    pub async fn insert_calls(&self, date: NaiveDate, record: &DayCallRecord) -> EngineResult<()> {
        self.insert_value(calls_key(date), record).await
    }

    /// Stores a raw value under a key, bypassing encoding.
    pub async fn insert_raw(&self, key: impl Into<String>, value: serde_json::Value) {
        let mut data = self.data.write().await;
        data.insert(key.into(), value);
    }

    /// Removes a key, returning whether it was present.
    pub async fn remove(&self, key: &str) -> bool {
        let mut data = self.data.write().await;
        data.remove(key).is_some()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    async fn insert_value<T: Serialize>(&self, key: String, record: &T) -> EngineResult<()> {
        let value = serde_json::to_value(record).map_err(|e| EngineError::Storage {
            message: format!("failed to encode '{}': {}", key, e),
        })?;
        self.insert_raw(key, value).await;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(&self, key: String) -> EngineResult<Option<T>> {
        let data = self.data.read().await;
        let Some(value) = data.get(&key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| EngineError::MalformedRecord {
                key,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_shift(&self, date: NaiveDate) -> EngineResult<Option<DayShiftRecord>> {
        self.decode(shift_key(date)).await
    }

    async fn get_calls(&self, date: NaiveDate) -> EngineResult<Option<DayCallRecord>> {
        self.decode(calls_key(date)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallEntry, ClockTime};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[tokio::test]
    async fn test_missing_records_are_none() {
        let store = MemoryRecordStore::new();
        assert!(store.get_shift(date()).await.unwrap().is_none());
        assert!(store.get_calls(date()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_round_trip_calls() {
        let store = MemoryRecordStore::new();
        let record = DayCallRecord::from_calls([CallEntry::new(
            ClockTime::from_hms(19, 0, 0).unwrap(),
            ClockTime::from_hms(19, 20, 0).unwrap(),
            1200,
        )]);
        store.insert_calls(date(), &record).await.unwrap();

        let loaded = store.get_calls(date()).await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_raw_value_uses_storage_key() {
        let store = MemoryRecordStore::new();
        store
            .insert_raw("shift-02-01-2024", serde_json::json!({"type": "AEX"}))
            .await;
        let shift = store.get_shift(date()).await.unwrap().unwrap();
        assert_eq!(shift.day_type.code(), "AEX");
    }

    #[tokio::test]
    async fn test_corrupt_value_is_malformed_record() {
        let store = MemoryRecordStore::new();
        store
            .insert_raw("rec-02-01-2024", serde_json::json!({"calls": "not a list"}))
            .await;
        match store.get_calls(date()).await {
            Err(EngineError::MalformedRecord { key, .. }) => assert_eq!(key, "rec-02-01-2024"),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryRecordStore::new();
        store
            .insert_shift(date(), &DayShiftRecord::normal(60, 0, 0))
            .await
            .unwrap();
        assert!(store.remove("shift-02-01-2024").await);
        assert!(!store.remove("shift-02-01-2024").await);
    }
}
