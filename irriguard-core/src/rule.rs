//! Rule-based relay decision
//!
//! The controller switches the irrigation pump on only when every sensor is
//! inside its operating window, at least one nutrient button is pressed, and
//! the day is not rainy:
//!
//! ```text
//! relay = humidity ∈ [30, 80]
//!       ∧ temperature ∈ [10, 50]
//!       ∧ light ∈ [0, 700]
//!       ∧ (btn_p ∨ btn_k)
//!       ∧ ¬rainy
//! ```
//!
//! Bounds are inclusive on both ends.

use crate::constants::sensors::{
    HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, LIGHT_MAX, LIGHT_MIN, TEMP_MAX_C, TEMP_MIN_C,
};

/// Instantaneous sensor state fed to the relay rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelayInputs {
    pub temperature: f64,
    pub humidity: f64,
    pub light: f64,
    pub btn_p: bool,
    pub btn_k: bool,
}

/// Inclusive range check; NaN is never in range
#[inline]
pub fn in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Whether all three analog sensors sit inside the controller window
pub fn sensors_in_window(inputs: &RelayInputs) -> bool {
    in_range(inputs.humidity, HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT)
        && in_range(inputs.temperature, TEMP_MIN_C, TEMP_MAX_C)
        && in_range(inputs.light, LIGHT_MIN, LIGHT_MAX)
}

/// Relay command for a reading taken on a day with the given weather
pub fn relay_decision(inputs: &RelayInputs, is_rainy: bool) -> bool {
    sensors_in_window(inputs) && (inputs.btn_p || inputs.btn_k) && !is_rainy
}
