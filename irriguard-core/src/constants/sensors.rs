//! Sensor Specifications and Limits
//!
//! Operating ranges for the sensors wired to the irrigation controller. The
//! same thresholds gate the relay on the controller firmware, so a reading
//! outside them never switches the pump on.

// ===== TEMPERATURE (DHT22) =====

/// Lowest temperature the controller accepts for irrigation (°C).
pub const TEMP_MIN_C: f64 = 10.0;

/// Highest temperature the controller accepts for irrigation (°C).
///
/// Above this the soil is assumed to be baking and watering is wasteful.
pub const TEMP_MAX_C: f64 = 50.0;

// ===== HUMIDITY (DHT22) =====

/// Lowest relative humidity the controller accepts (%).
pub const HUMIDITY_MIN_PCT: f64 = 30.0;

/// Highest relative humidity the controller accepts (%).
pub const HUMIDITY_MAX_PCT: f64 = 80.0;

// ===== LIGHT (LDR on ADC) =====

/// Lowest light level (raw ADC units scaled to the board's 0-700 window).
pub const LIGHT_MIN: f64 = 0.0;

/// Highest light level in the same unit.
pub const LIGHT_MAX: f64 = 700.0;

// ===== TRAINING =====

/// Number of readings below which a trained model is considered unreliable.
///
/// Training still runs with fewer rows, but a warning is logged.
pub const MIN_RECOMMENDED_TRAINING_READINGS: usize = 50;
