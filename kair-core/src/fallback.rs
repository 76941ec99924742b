//! Placeholder readings used when the live source fails.

use rand::Rng;

use crate::model::{City, Pollutants, Reading};

pub const FALLBACK_CONDITION: &str = "Partly Cloudy";

/// One synthetic reading per city, in [`City::ALL`] order.
///
/// Values are whole numbers drawn uniformly from half-open ranges:
/// aqi 20..170, temperature 25..35, humidity 40..80, wind 5..20,
/// pm25 0..50, pm10 0..80, no2 0..30, o3 0..40.
pub fn synthetic_readings<R: Rng>(rng: &mut R, last_updated: &str) -> Vec<Reading> {
    City::all()
        .iter()
        .map(|&city| Reading {
            city,
            aqi: rng.random_range(20..170),
            temperature: f64::from(rng.random_range(25_u32..35)),
            condition: FALLBACK_CONDITION.to_string(),
            humidity: f64::from(rng.random_range(40_u32..80)),
            wind_speed: f64::from(rng.random_range(5_u32..20)),
            pollutants: Pollutants {
                pm25: f64::from(rng.random_range(0_u32..50)),
                pm10: f64::from(rng.random_range(0_u32..80)),
                no2: f64::from(rng.random_range(0_u32..30)),
                o3: f64::from(rng.random_range(0_u32..40)),
            },
            last_updated: last_updated.to_string(),
        })
        .collect()
}
