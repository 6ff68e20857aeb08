//! Core schema and decision rules for IrriGuard
//!
//! Shared by the environmental simulator and the irrigation predictor:
//! - [`Reading`]: the typed sensor snapshot
//! - [`schema::prepare`]: turns loosely typed records into model input
//! - [`rule::relay_decision`]: the controller's pump rule
//! - [`store::ReadingStore`]: storage contract, with an in-memory backend
//!
//! ```no_run
//! use irriguard_core::{schema, Feature, RawRecord};
//! use serde_json::json;
//!
//! let mut record = RawRecord::new();
//! record.insert("HUMIDITY".into(), json!(55.0));
//! record.insert("TEMPERATURE".into(), json!(24.0));
//! record.insert("LIGHT".into(), json!(310));
//! record.insert("BTN_P".into(), json!(true));
//! record.insert("BTN_K".into(), json!(0));
//!
//! let table = schema::prepare(&[record], &Feature::ALL).unwrap();
//! assert_eq!(table.rows()[0], vec![55.0, 24.0, 310.0, 1.0, 0.0]);
//! ```

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod reading;
pub mod rule;
pub mod schema;
pub mod store;

// Public API
pub use errors::{SchemaError, SchemaResult, StoreError, StoreResult};
pub use reading::{Feature, RawRecord, Reading};
pub use rule::{relay_decision, RelayInputs};
pub use schema::{prepare, FeatureTable};
pub use store::{MemoryStore, ReadingStore, StoredReading};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
