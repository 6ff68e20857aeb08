//! Synthetic environmental data for IrriGuard
//!
//! Produces physically plausible sensor traces for a field controller:
//! diurnal temperature and humidity cycles, banded daylight, weather that
//! changes day to day, nutrient-button activity, and the controller's relay
//! decision for every reading.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use irriguard_sim::EnvironmentSimulator;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 12, 6).unwrap();
//!
//! let readings = EnvironmentSimulator::default().generate(start, end, 3)?;
//! assert_eq!(readings.len(), 6 * 24 * 3);
//! # Ok::<(), irriguard_sim::SimError>(())
//! ```
//!
//! Runs are unseeded unless the caller passes its own RNG to
//! [`EnvironmentSimulator::generate_with_rng`].

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod models;
pub mod sample;
pub mod simulator;
pub mod weather;

pub use config::{SimulatorConfig, DEFAULT_READINGS_PER_HOUR};
pub use errors::{SimError, SimResult};
pub use sample::uniform_sample;
pub use simulator::EnvironmentSimulator;
pub use weather::DailyWeatherContext;
