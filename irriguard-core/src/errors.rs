//! Error Types for Schema and Storage Failures
//!
//! ## Error Categories
//!
//! ### Schema Violations
//! - `MissingFeature`: A required column is absent from every record
//! - `InvalidValue`: A continuous feature has no usable value and nothing to
//!   fill it from
//! - `EmptyInput`: Nothing to prepare
//!
//! ### Storage Issues
//! - `NotConnected`: The store was used before `connect()` or after
//!   `disconnect()`
//! - `NotFound`: No reading with the requested id
//! - `UnknownField`: `update_reading` targeted a column the schema lacks
//!
//! ```rust
//! use irriguard_core::{schema, SchemaError, RawRecord};
//! use serde_json::json;
//!
//! let mut record = RawRecord::new();
//! record.insert("humidity".into(), json!(55.0));
//!
//! match schema::prepare(&[record], &irriguard_core::Feature::ALL) {
//!     Err(SchemaError::MissingFeature { feature }) => assert_eq!(feature, "temperature"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Reading schema violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A required feature column is absent
    #[error("Missing required feature: {feature}")]
    MissingFeature {
        /// Lowercase name of the missing column
        feature: String,
    },

    /// A continuous feature cell could not be parsed or filled
    #[error("Invalid value for feature {feature} at row {row}")]
    InvalidValue {
        /// Lowercase name of the column
        feature: String,
        /// Zero-based row index in the input
        row: usize,
    },

    /// No records were supplied
    #[error("No readings supplied")]
    EmptyInput,
}

/// Reading store failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Store used while disconnected
    #[error("Store is not connected")]
    NotConnected,

    /// No reading under this id
    #[error("Reading {id} not found")]
    NotFound {
        /// Requested id
        id: u64,
    },

    /// Field name is not part of the reading schema
    #[error("Unknown field: {field}")]
    UnknownField {
        /// Field as given by the caller
        field: String,
    },

    /// Value could not be stored in the target field
    #[error("Invalid value for field {field}")]
    InvalidValue {
        /// Lowercase field name
        field: String,
    },
}
