//! Constants for IrriGuard Core
//!
//! Numeric limits and field names shared by the simulator, the predictor and
//! the storage layer. Values live here so that the clamp applied during
//! simulation and the checks applied by the relay rule can never drift apart.
//!
//! ## Organization
//!
//! - **Sensors**: operating ranges of the field controller's sensors
//! - **Fields**: canonical (lowercase) column names of the reading schema

/// Sensor operating ranges enforced by the field controller.
pub mod sensors;

/// Canonical column names of the reading table.
pub mod fields;

pub use sensors::{
    TEMP_MIN_C, TEMP_MAX_C,
    HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT,
    LIGHT_MIN, LIGHT_MAX,
    MIN_RECOMMENDED_TRAINING_READINGS,
};
