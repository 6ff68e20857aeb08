//! Environmental simulator
//!
//! Walks an inclusive calendar range day by day. Each day draws one
//! [`DailyWeatherContext`]; each hour is split into `readings_per_hour` evenly
//! spaced slots, and each slot yields one [`Reading`] whose relay status comes
//! from [`irriguard_core::relay_decision`].
//!
//! ```rust
//! use chrono::NaiveDate;
//! use irriguard_sim::EnvironmentSimulator;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let readings = EnvironmentSimulator::default()
//!     .generate_with_rng(day, day, 1, &mut rng)
//!     .unwrap();
//! assert_eq!(readings.len(), 24);
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use irriguard_core::{relay_decision, Reading, RelayInputs};
use rand::Rng;

use crate::config::{SimulatorConfig, DEFAULT_READINGS_PER_HOUR};
use crate::errors::{SimError, SimResult};
use crate::models::{self, round_to};
use crate::weather::DailyWeatherContext;

const HOURS_PER_DAY: u32 = 24;
const SECONDS_PER_HOUR: i64 = 3600;

/// Synthetic sensor-trace generator
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSimulator {
    config: SimulatorConfig,
}

impl EnvironmentSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Generate readings for `start..=end` using the thread RNG
    pub fn generate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        readings_per_hour: u32,
    ) -> SimResult<Vec<Reading>> {
        self.generate_with_rng(start, end, readings_per_hour, &mut rand::thread_rng())
    }

    /// Generate at the default rate of three readings per hour
    pub fn generate_default(&self, start: NaiveDate, end: NaiveDate) -> SimResult<Vec<Reading>> {
        self.generate(start, end, DEFAULT_READINGS_PER_HOUR)
    }

    /// Generate readings for `start..=end` from a caller-supplied RNG
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        readings_per_hour: u32,
        rng: &mut R,
    ) -> SimResult<Vec<Reading>> {
        if start > end {
            return Err(SimError::InvalidRange { start, end });
        }
        if readings_per_hour == 0 {
            return Err(SimError::InvalidRate { readings_per_hour });
        }

        let days = (end - start).num_days() + 1;
        let total = HOURS_PER_DAY
            .checked_mul(readings_per_hour)
            .and_then(|per_day| usize::try_from(per_day).ok())
            .and_then(|per_day| usize::try_from(days).ok()?.checked_mul(per_day))
            .ok_or(SimError::InvalidRate { readings_per_hour })?;
        let mut readings = Vec::with_capacity(total);

        for date in start.iter_days().take(days as usize) {
            let weather = DailyWeatherContext::draw(date, &self.config, rng);
            log::debug!(
                "Generating data for {} (rainy: {}, temp offset {:.2}, humidity offset {:.2})",
                date,
                weather.is_rainy,
                weather.temp_offset,
                weather.humidity_offset
            );
            self.simulate_day(&weather, readings_per_hour, rng, &mut readings);
        }

        // Stable, so equal timestamps keep generation order
        readings.sort_by_key(|reading| reading.timestamp);

        log::info!(
            "Generated {} readings over {} days ({} per hour)",
            readings.len(),
            days,
            readings_per_hour
        );
        Ok(readings)
    }

    /// Append one day of readings under `weather`
    pub fn simulate_day<R: Rng + ?Sized>(
        &self,
        weather: &DailyWeatherContext,
        readings_per_hour: u32,
        rng: &mut R,
        out: &mut Vec<Reading>,
    ) {
        let midnight = weather.date.and_time(NaiveTime::MIN);

        for hour in 0..HOURS_PER_DAY {
            for slot in 0..readings_per_hour {
                let offset = i64::from(slot) * SECONDS_PER_HOUR / i64::from(readings_per_hour);
                let timestamp = midnight
                    + Duration::seconds(i64::from(hour) * SECONDS_PER_HOUR + offset);
                let fractional_hour = f64::from(hour) + f64::from(slot) / f64::from(readings_per_hour);

                out.push(self.simulate_reading(timestamp, hour, fractional_hour, weather, rng));
            }
        }
    }

    /// One reading at `timestamp`
    pub fn simulate_reading<R: Rng + ?Sized>(
        &self,
        timestamp: NaiveDateTime,
        hour: u32,
        fractional_hour: f64,
        weather: &DailyWeatherContext,
        rng: &mut R,
    ) -> Reading {
        let config = &self.config;

        let temperature = models::temperature(hour, weather, config, rng);
        let humidity = models::humidity(hour, weather, config, rng);
        let light = models::light(hour, fractional_hour, weather, config, rng);
        let (btn_p, btn_k) = models::buttons(hour, weather, config, rng);

        let relay = relay_decision(
            &RelayInputs {
                temperature,
                humidity,
                light,
                btn_p,
                btn_k,
            },
            weather.is_rainy,
        );

        let round = |value: f64| match config.round_decimals {
            Some(decimals) => round_to(value, decimals),
            None => value,
        };

        Reading {
            timestamp,
            temperature: round(temperature),
            humidity: round(humidity),
            light: round(light),
            btn_p: u8::from(btn_p),
            btn_k: u8::from(btn_k),
            relay_status: u8::from(relay),
        }
    }
}
