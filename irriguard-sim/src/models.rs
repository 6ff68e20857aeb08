//! Environmental signal models
//!
//! ## Diurnal Cycles
//!
//! Temperature and humidity follow a 24-hour cosine anchored at 14:00, with
//! signed amplitudes. Humidity always runs in inverse phase to temperature.
//!
//! ```text
//! T(h)  = 25 + day_offset + (-5) · cos((h - 14) · 2π / 24) + U(-0.5, 0.5)
//! RH(h) = 60 + day_offset + 15   · cos((h - 14) · 2π / 24) + U(-2, 2)
//! ```
//!
//! With the default signs the cosine term cools the 14:00 reading and warms
//! the 02:00 one; flip both amplitudes for an afternoon temperature peak.
//!
//! ## Light Bands
//!
//! ```text
//! 00:00 ─ 06:00   night      U(0, 50)
//! 06:00 ─ 10:00   morning    linear 50 → 600
//! 10:00 ─ 15:00   midday     U(500, 700)
//! 15:00 ─ 18:00   afternoon  linear 500 → 50
//! 18:00 ─ 24:00   night      U(0, 50)
//! ```
//!
//! Daylight values are attenuated by cloud cover (heavier when it rains).

use std::f64::consts::TAU;

use irriguard_core::constants::sensors::{
    HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, LIGHT_MAX, LIGHT_MIN, TEMP_MAX_C, TEMP_MIN_C,
};
use rand::Rng;

use crate::config::SimulatorConfig;
use crate::weather::{chance, uniform, DailyWeatherContext};

/// Cosine diurnal factor: +1 at the anchor hour, -1 twelve hours later
pub fn diurnal_phase(hour: u32, anchor_hour: f64) -> f64 {
    ((f64::from(hour) - anchor_hour) * TAU / 24.0).cos()
}

/// Air temperature, clamped to the controller window
pub fn temperature<R: Rng + ?Sized>(
    hour: u32,
    weather: &DailyWeatherContext,
    config: &SimulatorConfig,
    rng: &mut R,
) -> f64 {
    let diurnal = config.temp_diurnal_amplitude * diurnal_phase(hour, config.diurnal_anchor_hour);
    let value = config.base_temp_c + weather.temp_offset + diurnal + uniform(rng, config.temp_noise);
    value.clamp(TEMP_MIN_C, TEMP_MAX_C)
}

/// Relative humidity, clamped to the controller window
pub fn humidity<R: Rng + ?Sized>(
    hour: u32,
    weather: &DailyWeatherContext,
    config: &SimulatorConfig,
    rng: &mut R,
) -> f64 {
    let diurnal = config.humidity_diurnal_amplitude * diurnal_phase(hour, config.diurnal_anchor_hour);
    let value = config.base_humidity_pct
        + weather.humidity_offset
        + diurnal
        + uniform(rng, config.humidity_noise);
    value.clamp(HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT)
}

/// Light level at `fractional_hour` (hour plus elapsed fraction), clamped
pub fn light<R: Rng + ?Sized>(
    hour: u32,
    fractional_hour: f64,
    weather: &DailyWeatherContext,
    config: &SimulatorConfig,
    rng: &mut R,
) -> f64 {
    if !config.is_daytime(hour) {
        return uniform(rng, config.night_light).clamp(LIGHT_MIN, LIGHT_MAX);
    }

    let clear_sky = if hour < config.midday_start_hour {
        interpolate(
            fractional_hour,
            (f64::from(config.day_start_hour), f64::from(config.midday_start_hour)),
            config.morning_light,
        )
    } else if hour < config.afternoon_start_hour {
        uniform(rng, config.midday_light)
    } else {
        interpolate(
            fractional_hour,
            (f64::from(config.afternoon_start_hour), f64::from(config.day_end_hour)),
            config.afternoon_light,
        )
    };

    let attenuation = if weather.is_rainy {
        uniform(rng, config.rainy_attenuation)
    } else {
        uniform(rng, config.clear_attenuation)
    };

    (clear_sky * attenuation).clamp(LIGHT_MIN, LIGHT_MAX)
}

/// P and K button states
pub fn buttons<R: Rng + ?Sized>(
    hour: u32,
    weather: &DailyWeatherContext,
    config: &SimulatorConfig,
    rng: &mut R,
) -> (bool, bool) {
    let daytime_factor = if config.is_daytime(hour) {
        config.daytime_button_factor
    } else {
        config.night_button_factor
    };
    let weather_factor = if weather.is_rainy { config.rain_button_factor } else { 1.0 };
    let p = daytime_factor * weather_factor;

    let btn_p = chance(rng, p);
    let btn_k = chance(rng, p * config.btn_k_factor);
    (btn_p, btn_k)
}

/// Linear interpolation of `x` over `xs` onto `ys`, holding the end values
/// outside the interval
pub fn interpolate(x: f64, (x0, x1): (f64, f64), (y0, y1): (f64, f64)) -> f64 {
    if x1 <= x0 || x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Most decimal places an `f64` reading can meaningfully carry
pub const MAX_ROUND_DECIMALS: u32 = 15;

/// Round to `decimals` places, capped at [`MAX_ROUND_DECIMALS`]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_ROUND_DECIMALS) as i32);
    (value * factor).round() / factor
}
