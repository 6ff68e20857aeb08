//! Per-day weather draw
//!
//! Each simulated calendar day gets one [`DailyWeatherContext`], drawn before
//! the first reading of the day and shared by every reading of that day. Rain
//! cools and humidifies:
//!
//! ```text
//! temp_offset     ~ U(-3, 3)    - U(2, 5)   if rainy
//! humidity_offset ~ U(-10, 10)  + U(10, 20) if rainy
//! rainy           ~ Bernoulli(0.3)
//! ```

use chrono::NaiveDate;
use rand::Rng;

use crate::config::SimulatorConfig;

/// Weather state for one simulated day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyWeatherContext {
    pub date: NaiveDate,
    /// Shift applied to every temperature of the day (°C)
    pub temp_offset: f64,
    /// Shift applied to every humidity of the day (%)
    pub humidity_offset: f64,
    pub is_rainy: bool,
}

impl DailyWeatherContext {
    /// Draw the weather for `date`
    pub fn draw<R: Rng + ?Sized>(date: NaiveDate, config: &SimulatorConfig, rng: &mut R) -> Self {
        let mut temp_offset = uniform(rng, config.daily_temp_offset);
        let mut humidity_offset = uniform(rng, config.daily_humidity_offset);

        let is_rainy = chance(rng, config.rain_probability);
        if is_rainy {
            humidity_offset += uniform(rng, config.rain_humidity_boost);
            temp_offset -= uniform(rng, config.rain_cooling);
        }

        Self {
            date,
            temp_offset,
            humidity_offset,
            is_rainy,
        }
    }
}

/// Uniform draw from `[low, high)`; a degenerate range yields `low`
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Bernoulli draw; probabilities outside [0, 1] saturate
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    #[test]
    fn offsets_stay_in_configured_bounds() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let ctx = DailyWeatherContext::draw(day(), &config, &mut rng);
            if ctx.is_rainy {
                assert!(ctx.temp_offset >= -8.0 && ctx.temp_offset < 1.0);
                assert!(ctx.humidity_offset >= 0.0 && ctx.humidity_offset < 30.0);
            } else {
                assert!(ctx.temp_offset >= -3.0 && ctx.temp_offset < 3.0);
                assert!(ctx.humidity_offset >= -10.0 && ctx.humidity_offset < 10.0);
            }
        }
    }

    #[test]
    fn rain_probability_extremes() {
        let mut config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        config.rain_probability = 0.0;
        assert!((0..100).all(|_| !DailyWeatherContext::draw(day(), &config, &mut rng).is_rainy));

        config.rain_probability = 1.0;
        assert!((0..100).all(|_| DailyWeatherContext::draw(day(), &config, &mut rng).is_rainy));
    }

    #[test]
    fn rainy_fraction_near_probability() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let rainy = (0..5000)
            .filter(|_| DailyWeatherContext::draw(day(), &config, &mut rng).is_rainy)
            .count();
        let fraction = rainy as f64 / 5000.0;
        assert!((fraction - 0.3).abs() < 0.03, "fraction = {fraction}");
    }

    #[test]
    fn degenerate_range_returns_low() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(uniform(&mut rng, (4.0, 4.0)), 4.0);
        assert_eq!(uniform(&mut rng, (500.0, 50.0)), 500.0);
    }
}
