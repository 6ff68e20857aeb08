//! Generator invariants over random seeds, ranges and rates

use chrono::{Duration, NaiveDate};
use irriguard_core::constants::sensors::{
    HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, LIGHT_MAX, LIGHT_MIN, TEMP_MAX_C, TEMP_MIN_C,
};
use irriguard_sim::{DailyWeatherContext, EnvironmentSimulator, SimError, SimulatorConfig};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn readings_stay_in_domain(seed in any::<u64>(), days in 1i64..4, rate in 1u32..7) {
        let start = base_date();
        let end = start + Duration::days(days - 1);
        let readings = EnvironmentSimulator::default()
            .generate_with_rng(start, end, rate, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        prop_assert_eq!(readings.len(), days as usize * 24 * rate as usize);

        for r in &readings {
            prop_assert!((TEMP_MIN_C..=TEMP_MAX_C).contains(&r.temperature));
            prop_assert!((HUMIDITY_MIN_PCT..=HUMIDITY_MAX_PCT).contains(&r.humidity));
            prop_assert!((LIGHT_MIN..=LIGHT_MAX).contains(&r.light));
            prop_assert!(r.btn_p <= 1 && r.btn_k <= 1 && r.relay_status <= 1);
            if r.btn_p == 0 && r.btn_k == 0 {
                prop_assert_eq!(r.relay_status, 0);
            }
        }

        for pair in readings.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn rainy_days_never_irrigate(seed in any::<u64>(), rate in 1u32..5) {
        let sim = EnvironmentSimulator::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut weather = DailyWeatherContext::draw(base_date(), sim.config(), &mut rng);
        weather.is_rainy = true;

        let mut readings = Vec::new();
        sim.simulate_day(&weather, rate, &mut rng, &mut readings);

        prop_assert_eq!(readings.len(), 24 * rate as usize);
        prop_assert!(readings.iter().all(|r| r.relay_status == 0));
    }
}

#[test]
fn six_day_default_run() {
    let start = base_date();
    let end = NaiveDate::from_ymd_opt(2024, 12, 6).unwrap();
    let readings = EnvironmentSimulator::default().generate_default(start, end).unwrap();

    assert_eq!(readings.len(), 6 * 24 * 3);
    assert_eq!(readings.first().unwrap().timestamp, start.and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(readings.last().unwrap().timestamp, end.and_hms_opt(23, 40, 0).unwrap());
}

#[test]
fn unseeded_runs_differ() {
    let day = base_date();
    let sim = EnvironmentSimulator::default();
    let a = sim.generate(day, day, 3).unwrap();
    let b = sim.generate(day, day, 3).unwrap();
    assert_ne!(a, b);
}

#[test]
fn inverted_range_is_an_error() {
    let sim = EnvironmentSimulator::new(SimulatorConfig::default());
    let start = base_date() + Duration::days(1);
    assert!(matches!(
        sim.generate(start, base_date(), 3),
        Err(SimError::InvalidRange { .. })
    ));
}

#[test]
fn uneven_rate_spacing() {
    // 7 slots per hour: offsets truncate to whole seconds
    let day = base_date();
    let readings = EnvironmentSimulator::default()
        .generate_with_rng(day, day, 7, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let second = readings[1].timestamp - readings[0].timestamp;
    assert_eq!(second, Duration::seconds(514));
}
