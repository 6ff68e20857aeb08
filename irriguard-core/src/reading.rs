//! Sensor readings and model features
//!
//! [`Reading`] is the typed snapshot produced by the simulator and held by the
//! store. [`RawRecord`] is the untyped form that arrives from storage or a
//! caller, with arbitrary field casing and loosely typed cells; it is turned
//! into model input by [`crate::schema::prepare`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::fields;

/// Untyped reading: field name to JSON cell
pub type RawRecord = Map<String, Value>;

/// Timestamp layout used when a reading is flattened into a record
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One sensor snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Time of the snapshot (local controller time)
    pub timestamp: NaiveDateTime,
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Light level (0-700)
    pub light: f64,
    /// Phosphorus dosing button (0/1)
    pub btn_p: u8,
    /// Potassium dosing button (0/1)
    pub btn_k: u8,
    /// Irrigation pump command (0/1)
    pub relay_status: u8,
}

impl Reading {
    /// Value of a model feature
    pub fn feature(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Humidity => self.humidity,
            Feature::Temperature => self.temperature,
            Feature::Light => self.light,
            Feature::BtnP => f64::from(self.btn_p),
            Feature::BtnK => f64::from(self.btn_k),
        }
    }

    /// Flatten into a lowercase-keyed record
    pub fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert(
            fields::TIMESTAMP.to_string(),
            Value::String(self.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        );
        record.insert(fields::TEMPERATURE.to_string(), number(self.temperature));
        record.insert(fields::HUMIDITY.to_string(), number(self.humidity));
        record.insert(fields::LIGHT.to_string(), number(self.light));
        record.insert(fields::BTN_P.to_string(), Value::from(self.btn_p));
        record.insert(fields::BTN_K.to_string(), Value::from(self.btn_k));
        record.insert(fields::RELAY_STATUS.to_string(), Value::from(self.relay_status));
        record
    }
}

impl From<&Reading> for RawRecord {
    fn from(reading: &Reading) -> Self {
        reading.to_record()
    }
}

// NaN/inf become JSON null, which prepare() then treats as a missing cell
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Model input columns, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Humidity,
    Temperature,
    Light,
    BtnP,
    BtnK,
}

impl Feature {
    /// All features in the order the model is trained on by default
    pub const ALL: [Feature; 5] = [
        Feature::Humidity,
        Feature::Temperature,
        Feature::Light,
        Feature::BtnP,
        Feature::BtnK,
    ];

    /// Lowercase column name
    pub fn name(self) -> &'static str {
        match self {
            Feature::Humidity => fields::HUMIDITY,
            Feature::Temperature => fields::TEMPERATURE,
            Feature::Light => fields::LIGHT,
            Feature::BtnP => fields::BTN_P,
            Feature::BtnK => fields::BTN_K,
        }
    }

    /// Look up a feature by column name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.name() == lower)
    }

    /// Whether the column holds a 0/1 flag
    pub fn is_flag(self) -> bool {
        matches!(self, Feature::BtnP | Feature::BtnK)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Reading {
        Reading {
            timestamp: NaiveDate::from_ymd_opt(2024, 12, 1)
                .unwrap()
                .and_hms_opt(14, 20, 0)
                .unwrap(),
            temperature: 29.5,
            humidity: 48.25,
            light: 612.0,
            btn_p: 1,
            btn_k: 0,
            relay_status: 1,
        }
    }

    #[test]
    fn feature_lookup_ignores_case() {
        assert_eq!(Feature::from_name("HUMIDITY"), Some(Feature::Humidity));
        assert_eq!(Feature::from_name("Btn_K"), Some(Feature::BtnK));
        assert_eq!(Feature::from_name("relay_status"), None);
    }

    #[test]
    fn record_carries_all_columns() {
        let record = sample().to_record();
        assert_eq!(record.len(), 7);
        assert_eq!(record["timestamp"], Value::String("2024-12-01T14:20:00".into()));
        assert_eq!(record["btn_p"], Value::from(1u8));
        assert_eq!(record["light"].as_f64(), Some(612.0));
    }

    #[test]
    fn feature_values_follow_reading() {
        let reading = sample();
        assert_eq!(reading.feature(Feature::Humidity), 48.25);
        assert_eq!(reading.feature(Feature::BtnP), 1.0);
        assert_eq!(reading.feature(Feature::BtnK), 0.0);
    }

    #[test]
    fn feature_serializes_as_column_name() {
        let json = serde_json::to_string(&Feature::BtnP).unwrap();
        assert_eq!(json, "\"btn_p\"");
    }
}
