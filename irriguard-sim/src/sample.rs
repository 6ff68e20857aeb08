//! Uniform training samples
//!
//! Features are drawn uniformly over the controller window with no diurnal
//! structure and no rain, so `relay_status` is an exact function of the
//! features (`btn_p ∨ btn_k`). Useful for checking that a model can learn the
//! rule at all.

use chrono::{Duration, NaiveDateTime};
use irriguard_core::constants::sensors::{
    HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, LIGHT_MAX, LIGHT_MIN, TEMP_MAX_C, TEMP_MIN_C,
};
use irriguard_core::{relay_decision, Reading, RelayInputs};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n_samples` readings one minute apart starting at `start`
pub fn uniform_sample(n_samples: usize, start: NaiveDateTime, seed: u64) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n_samples)
        .map(|i| {
            let humidity = rng.gen_range(HUMIDITY_MIN_PCT..HUMIDITY_MAX_PCT);
            let temperature = rng.gen_range(TEMP_MIN_C..TEMP_MAX_C);
            let light = rng.gen_range(LIGHT_MIN..LIGHT_MAX);
            let btn_p = rng.gen_bool(0.5);
            let btn_k = rng.gen_bool(0.5);

            let relay = relay_decision(
                &RelayInputs {
                    temperature,
                    humidity,
                    light,
                    btn_p,
                    btn_k,
                },
                false,
            );

            Reading {
                timestamp: start + Duration::minutes(i as i64),
                temperature,
                humidity,
                light,
                btn_p: u8::from(btn_p),
                btn_k: u8::from(btn_k),
                relay_status: u8::from(relay),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn relay_is_button_or() {
        for r in uniform_sample(500, start(), 42) {
            assert_eq!(r.relay_status == 1, r.btn_p == 1 || r.btn_k == 1);
        }
    }

    #[test]
    fn seed_is_reproducible() {
        assert_eq!(uniform_sample(50, start(), 3), uniform_sample(50, start(), 3));
        assert_ne!(uniform_sample(50, start(), 3), uniform_sample(50, start(), 4));
    }

    #[test]
    fn timestamps_one_minute_apart() {
        let readings = uniform_sample(3, start(), 1);
        assert_eq!(readings[2].timestamp - readings[0].timestamp, Duration::minutes(2));
    }
}
