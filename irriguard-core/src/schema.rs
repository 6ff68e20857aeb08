//! Schema normalization for model input
//!
//! Storage backends hand back rows with their own column casing (the
//! relational store uses `HUMIDITY`, callers tend to write `humidity`) and
//! loosely typed cells (booleans, numeric strings, nulls). [`prepare`] is the
//! single place where that is reconciled:
//!
//! 1. Field names are folded to lowercase.
//! 2. Every requested feature must appear in at least one record.
//! 3. Flag columns (`btn_p`, `btn_k`, `relay_status`) become 0/1. Numbers are
//!    truncated toward zero and any non-zero value counts as set; booleans and
//!    numeric strings are accepted.
//! 4. A missing or unparsable cell takes the last valid value of its column
//!    (forward fill). With nothing to fill from, a flag becomes 0 and a
//!    continuous feature is an error.
//! 5. Non-finite continuous values (`"inf"`, `"NaN"`) parse and are kept, so
//!    the model can reject them instead of silently filling them.
//!
//! Records are assumed to be in time order; forward fill follows input order.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::constants::fields;
use crate::errors::{SchemaError, SchemaResult};
use crate::reading::{Feature, RawRecord, Reading};

/// Validated model input: one row per record, one column per feature
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    features: Vec<Feature>,
    rows: Vec<Vec<f64>>,
    target: Option<Vec<f64>>,
}

impl FeatureTable {
    /// Column order of every row
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Feature rows, in input order
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// `relay_status` column, when the input carried one
    pub fn target(&self) -> Option<&[f64]> {
        self.target.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one feature across all rows
    pub fn column(&self, feature: Feature) -> Option<Vec<f64>> {
        let idx = self.features.iter().position(|f| *f == feature)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }
}

/// Normalize raw records into a [`FeatureTable`] over `features`
pub fn prepare(records: &[RawRecord], features: &[Feature]) -> SchemaResult<FeatureTable> {
    if records.is_empty() {
        return Err(SchemaError::EmptyInput);
    }

    let normalized: Vec<BTreeMap<String, &Value>> = records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(key, value)| (key.to_ascii_lowercase(), value))
                .collect()
        })
        .collect();

    let has_column = |name: &str| normalized.iter().any(|row| row.contains_key(name));

    for feature in features {
        if !has_column(feature.name()) {
            return Err(SchemaError::MissingFeature {
                feature: feature.name().to_string(),
            });
        }
    }

    let mut columns = Vec::with_capacity(features.len());
    for feature in features {
        let column = if feature.is_flag() {
            flag_column(&normalized, feature.name())
        } else {
            continuous_column(&normalized, feature.name())?
        };
        columns.push(column);
    }

    let rows = (0..normalized.len())
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();

    let target = has_column(fields::RELAY_STATUS)
        .then(|| flag_column(&normalized, fields::RELAY_STATUS));

    Ok(FeatureTable {
        features: features.to_vec(),
        rows,
        target,
    })
}

/// Convenience wrapper for typed readings
pub fn prepare_readings(readings: &[Reading], features: &[Feature]) -> SchemaResult<FeatureTable> {
    let records: Vec<RawRecord> = readings.iter().map(Reading::to_record).collect();
    prepare(&records, features)
}

fn flag_column(rows: &[BTreeMap<String, &Value>], name: &str) -> Vec<f64> {
    let mut last = 0.0;
    rows.iter()
        .map(|row| {
            if let Some(flag) = row.get(name).and_then(|cell| parse_flag(cell)) {
                last = f64::from(flag);
            }
            last
        })
        .collect()
}

fn continuous_column(rows: &[BTreeMap<String, &Value>], name: &str) -> SchemaResult<Vec<f64>> {
    let mut last: Option<f64> = None;
    let mut column = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        if let Some(value) = row.get(name).and_then(|cell| parse_number(cell)) {
            last = Some(value);
        }
        match last {
            Some(value) => column.push(value),
            None => {
                return Err(SchemaError::InvalidValue {
                    feature: name.to_string(),
                    row: idx,
                })
            }
        }
    }

    Ok(column)
}

/// Parse a continuous cell; `"inf"` and `"NaN"` strings are returned as-is
pub fn parse_number(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse a continuous cell, treating non-finite values as unparsable
pub fn parse_finite(cell: &Value) -> Option<f64> {
    parse_number(cell).filter(|value| value.is_finite())
}

/// Parse a flag cell into 0/1
pub fn parse_flag(cell: &Value) -> Option<u8> {
    match cell {
        Value::Bool(b) => Some(u8::from(*b)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Some(1)
            } else if trimmed.eq_ignore_ascii_case("false") {
                Some(0)
            } else {
                parse_finite(cell).map(truncate_flag)
            }
        }
        Value::Number(_) => parse_finite(cell).map(truncate_flag),
        _ => None,
    }
}

fn truncate_flag(value: f64) -> u8 {
    u8::from(value.trunc() != 0.0)
}
