//! Simulation parameters
//!
//! Defaults reproduce a temperate growing season: 25°C / 60% RH base
//! conditions, diurnal cycles anchored at 14:00, and a 30% chance that any
//! given day is rainy. Ranges are `(low, high)` pairs drawn uniformly.

use serde::{Deserialize, Serialize};

/// Default sampling rate: one reading every 20 minutes
pub const DEFAULT_READINGS_PER_HOUR: u32 = 3;

/// Parameters of the environmental model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Mean daily temperature before weather offsets (°C)
    pub base_temp_c: f64,
    /// Mean relative humidity before weather offsets (%)
    pub base_humidity_pct: f64,
    /// Per-day temperature offset range (°C)
    pub daily_temp_offset: (f64, f64),
    /// Per-day humidity offset range (%)
    pub daily_humidity_offset: (f64, f64),

    /// Chance that a day is rainy
    pub rain_probability: f64,
    /// Extra humidity added on rainy days (%)
    pub rain_humidity_boost: (f64, f64),
    /// Cooling subtracted on rainy days (°C)
    pub rain_cooling: (f64, f64),

    /// Hour at which the diurnal cosine is at +1
    pub diurnal_anchor_hour: f64,
    /// Signed amplitude of the diurnal temperature cosine (°C)
    pub temp_diurnal_amplitude: f64,
    /// Signed amplitude of the diurnal humidity cosine (%)
    pub humidity_diurnal_amplitude: f64,
    /// Temperature sensor noise range (°C)
    pub temp_noise: (f64, f64),
    /// Humidity sensor noise range (%)
    pub humidity_noise: (f64, f64),

    /// First daylight hour
    pub day_start_hour: u32,
    /// First hour of the midday plateau
    pub midday_start_hour: u32,
    /// First hour of the afternoon ramp-down
    pub afternoon_start_hour: u32,
    /// First night hour
    pub day_end_hour: u32,
    /// Light level range at night
    pub night_light: (f64, f64),
    /// Light at the start and end of the morning ramp
    pub morning_light: (f64, f64),
    /// Light range on the midday plateau
    pub midday_light: (f64, f64),
    /// Light at the start and end of the afternoon ramp
    pub afternoon_light: (f64, f64),
    /// Daytime light multiplier on clear days
    pub clear_attenuation: (f64, f64),
    /// Daytime light multiplier on rainy days
    pub rainy_attenuation: (f64, f64),

    /// Button press probability during daylight
    pub daytime_button_factor: f64,
    /// Button press probability at night
    pub night_button_factor: f64,
    /// Multiplier on button probability when it rains
    pub rain_button_factor: f64,
    /// Extra multiplier applied to the K button
    pub btn_k_factor: f64,

    /// Decimal places kept on continuous values (`None` keeps full precision)
    pub round_decimals: Option<u32>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_temp_c: 25.0,
            base_humidity_pct: 60.0,
            daily_temp_offset: (-3.0, 3.0),
            daily_humidity_offset: (-10.0, 10.0),

            rain_probability: 0.3,
            rain_humidity_boost: (10.0, 20.0),
            rain_cooling: (2.0, 5.0),

            diurnal_anchor_hour: 14.0,
            temp_diurnal_amplitude: -5.0,
            humidity_diurnal_amplitude: 15.0,
            temp_noise: (-0.5, 0.5),
            humidity_noise: (-2.0, 2.0),

            day_start_hour: 6,
            midday_start_hour: 10,
            afternoon_start_hour: 15,
            day_end_hour: 18,
            night_light: (0.0, 50.0),
            morning_light: (50.0, 600.0),
            midday_light: (500.0, 700.0),
            afternoon_light: (500.0, 50.0),
            clear_attenuation: (0.7, 1.0),
            rainy_attenuation: (0.3, 0.6),

            daytime_button_factor: 0.7,
            night_button_factor: 0.3,
            rain_button_factor: 0.5,
            btn_k_factor: 0.8,

            round_decimals: Some(2),
        }
    }
}

impl SimulatorConfig {
    /// Whether `hour` falls in daylight
    pub fn is_daytime(&self, hour: u32) -> bool {
        hour >= self.day_start_hour && hour < self.day_end_hour
    }
}
