//! Reading storage contract
//!
//! The production deployment keeps readings in a relational table
//! (`ID, TIMESTAMP, HUMIDITY, TEMPERATURE, LIGHT, BTN_P, BTN_K, RELAY_STATUS`).
//! The core only depends on the [`ReadingStore`] trait; [`MemoryStore`] is a
//! reference backend for tests, demos and offline analysis.
//!
//! ```rust
//! use irriguard_core::store::{MemoryStore, ReadingStore};
//! # use irriguard_core::Reading;
//! # use chrono::NaiveDate;
//! # let reading = Reading {
//! #     timestamp: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
//! #     temperature: 20.0, humidity: 70.0, light: 10.0, btn_p: 0, btn_k: 0, relay_status: 0,
//! # };
//!
//! let mut store = MemoryStore::new();
//! store.connect()?;
//! let id = store.insert_reading(reading)?;
//! assert_eq!(store.get_all_readings()?[0].id, id);
//! store.disconnect()?;
//! # Ok::<(), irriguard_core::StoreError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::fields;
use crate::errors::{StoreError, StoreResult};
use crate::reading::{RawRecord, Reading};
use crate::schema::{parse_finite, parse_flag};

/// A reading together with its store-assigned id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    pub id: u64,
    pub reading: Reading,
}

impl StoredReading {
    /// Export as a record with the relational table's uppercase column names
    pub fn to_record(&self) -> RawRecord {
        let mut record: RawRecord = self
            .reading
            .to_record()
            .into_iter()
            .map(|(key, value)| (key.to_ascii_uppercase(), value))
            .collect();
        record.insert(fields::ID.to_ascii_uppercase(), Value::from(self.id));
        record
    }
}

/// CRUD access to timestamped readings
pub trait ReadingStore {
    /// Open the backend
    fn connect(&mut self) -> StoreResult<()>;

    /// Close the backend; further calls fail until reconnected
    fn disconnect(&mut self) -> StoreResult<()>;

    /// Persist a reading and return its id
    fn insert_reading(&mut self, reading: Reading) -> StoreResult<u64>;

    /// All readings, ascending by timestamp
    fn get_all_readings(&self) -> StoreResult<Vec<StoredReading>>;

    /// Overwrite one column of a stored reading
    fn update_reading(&mut self, id: u64, field: &str, value: &Value) -> StoreResult<()>;

    /// Remove a single reading
    fn delete_reading(&mut self, id: u64) -> StoreResult<()>;

    /// Remove everything; returns how many readings were dropped
    fn delete_all_readings(&mut self) -> StoreResult<usize>;

    /// All readings exported as records, ready for [`crate::schema::prepare`]
    fn get_all_records(&self) -> StoreResult<Vec<RawRecord>> {
        Ok(self
            .get_all_readings()?
            .iter()
            .map(StoredReading::to_record)
            .collect())
    }
}

/// In-memory [`ReadingStore`]
#[derive(Debug)]
pub struct MemoryStore {
    readings: BTreeMap<u64, Reading>,
    next_id: u64,
    connected: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            readings: BTreeMap::new(),
            next_id: 1,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    fn ensure_connected(&self) -> StoreResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(StoreError::NotConnected)
        }
    }
}

impl ReadingStore for MemoryStore {
    fn connect(&mut self) -> StoreResult<()> {
        self.connected = true;
        log::info!("Memory store connected ({} readings)", self.readings.len());
        Ok(())
    }

    fn disconnect(&mut self) -> StoreResult<()> {
        self.connected = false;
        log::info!("Memory store disconnected");
        Ok(())
    }

    fn insert_reading(&mut self, reading: Reading) -> StoreResult<u64> {
        self.ensure_connected()?;
        let id = self.next_id;
        self.next_id += 1;
        self.readings.insert(id, reading);
        log::debug!("Inserted reading {} at {}", id, reading.timestamp);
        Ok(id)
    }

    fn get_all_readings(&self) -> StoreResult<Vec<StoredReading>> {
        self.ensure_connected()?;
        let mut all: Vec<StoredReading> = self
            .readings
            .iter()
            .map(|(&id, &reading)| StoredReading { id, reading })
            .collect();
        // ids break timestamp ties so the order is stable
        all.sort_by_key(|stored| (stored.reading.timestamp, stored.id));
        Ok(all)
    }

    fn update_reading(&mut self, id: u64, field: &str, value: &Value) -> StoreResult<()> {
        self.ensure_connected()?;
        let reading = self.readings.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        let name = field.to_ascii_lowercase();
        let invalid = || StoreError::InvalidValue { field: name.clone() };

        match name.as_str() {
            fields::TEMPERATURE => reading.temperature = parse_finite(value).ok_or_else(invalid)?,
            fields::HUMIDITY => reading.humidity = parse_finite(value).ok_or_else(invalid)?,
            fields::LIGHT => reading.light = parse_finite(value).ok_or_else(invalid)?,
            fields::BTN_P => reading.btn_p = parse_flag(value).ok_or_else(invalid)?,
            fields::BTN_K => reading.btn_k = parse_flag(value).ok_or_else(invalid)?,
            fields::RELAY_STATUS => reading.relay_status = parse_flag(value).ok_or_else(invalid)?,
            fields::TIMESTAMP => {
                let parsed = value
                    .as_str()
                    .and_then(|s| {
                        chrono::NaiveDateTime::parse_from_str(s, crate::reading::TIMESTAMP_FORMAT).ok()
                    })
                    .ok_or_else(invalid)?;
                reading.timestamp = parsed;
            }
            _ => {
                return Err(StoreError::UnknownField {
                    field: field.to_string(),
                })
            }
        }

        log::debug!("Updated reading {} field {}", id, name);
        Ok(())
    }

    fn delete_reading(&mut self, id: u64) -> StoreResult<()> {
        self.ensure_connected()?;
        self.readings.remove(&id).ok_or(StoreError::NotFound { id })?;
        log::debug!("Deleted reading {}", id);
        Ok(())
    }

    fn delete_all_readings(&mut self) -> StoreResult<usize> {
        self.ensure_connected()?;
        let count = self.readings.len();
        self.readings.clear();
        log::info!("Deleted {} readings", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn reading_at(hour: u32) -> Reading {
        Reading {
            timestamp: NaiveDate::from_ymd_opt(2024, 12, 2)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature: 22.0,
            humidity: 65.0,
            light: 40.0,
            btn_p: 0,
            btn_k: 1,
            relay_status: 1,
        }
    }

    fn connected() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.connect().unwrap();
        store
    }

    #[test]
    fn requires_connection() {
        let mut store = MemoryStore::new();
        assert_eq!(store.insert_reading(reading_at(1)), Err(StoreError::NotConnected));
        assert_eq!(store.get_all_readings(), Err(StoreError::NotConnected));
    }

    #[test]
    fn readings_come_back_in_time_order() {
        let mut store = connected();
        store.insert_reading(reading_at(9)).unwrap();
        store.insert_reading(reading_at(3)).unwrap();
        store.insert_reading(reading_at(6)).unwrap();

        let hours: Vec<u32> = store
            .get_all_readings()
            .unwrap()
            .iter()
            .map(|s| chrono::Timelike::hour(&s.reading.timestamp))
            .collect();
        assert_eq!(hours, vec![3, 6, 9]);
    }

    #[test]
    fn update_coerces_values() {
        let mut store = connected();
        let id = store.insert_reading(reading_at(1)).unwrap();

        store.update_reading(id, "HUMIDITY", &json!("71.5")).unwrap();
        store.update_reading(id, "relay_status", &json!(false)).unwrap();

        let stored = store.get_all_readings().unwrap()[0];
        assert_eq!(stored.reading.humidity, 71.5);
        assert_eq!(stored.reading.relay_status, 0);
    }

    #[test]
    fn update_rejects_non_finite_numbers() {
        let mut store = connected();
        let id = store.insert_reading(reading_at(1)).unwrap();
        let err = store.update_reading(id, "temperature", &json!("inf")).unwrap_err();
        assert_eq!(err, StoreError::InvalidValue { field: "temperature".into() });
        assert_eq!(store.get_all_readings().unwrap()[0].reading.temperature, reading_at(1).temperature);
    }

    #[test]
    fn update_rejects_unknown_field() {
        let mut store = connected();
        let id = store.insert_reading(reading_at(1)).unwrap();
        let err = store.update_reading(id, "pressure", &json!(1013)).unwrap_err();
        assert_eq!(err, StoreError::UnknownField { field: "pressure".into() });
    }

    #[test]
    fn delete_missing_id_fails() {
        let mut store = connected();
        assert_eq!(store.delete_reading(42), Err(StoreError::NotFound { id: 42 }));
    }

    #[test]
    fn delete_all_reports_count() {
        let mut store = connected();
        store.insert_reading(reading_at(1)).unwrap();
        store.insert_reading(reading_at(2)).unwrap();
        assert_eq!(store.delete_all_readings().unwrap(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn records_use_uppercase_columns() {
        let mut store = connected();
        let id = store.insert_reading(reading_at(5)).unwrap();
        let records = store.get_all_records().unwrap();
        assert_eq!(records[0]["ID"], json!(id));
        assert!(records[0].contains_key("RELAY_STATUS"));
        assert!(!records[0].contains_key("relay_status"));
    }
}
