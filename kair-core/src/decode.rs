//! Strict decoding of the model's textual answer into readings.

use serde::Deserialize;
use tracing::warn;

use crate::{
    error::FetchError,
    model::{City, Pollutants, Reading},
};

/// One array element as the model is asked to produce it (no timestamp).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReading {
    city: City,
    #[serde(deserialize_with = "crate::model::integral_number")]
    aqi: i32,
    temperature: f64,
    condition: String,
    humidity: f64,
    wind_speed: f64,
    pollutants: Pollutants,
}

/// Removes a surrounding markdown code fence (```` ```json ```` or bare ```` ``` ````).
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// Decodes the model's answer into readings stamped with `last_updated`.
///
/// Either every element is a complete reading or the whole answer is rejected.
/// Output is ordered by [`City::ALL`]; a repeated city keeps its first entry.
pub fn decode_readings(text: &str, last_updated: &str) -> Result<Vec<Reading>, FetchError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(FetchError::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let items: Vec<ModelReading> =
        serde_json::from_value(value).map_err(|e| FetchError::InvalidShape(e.to_string()))?;

    if items.is_empty() {
        return Err(FetchError::InvalidShape("empty array".to_string()));
    }

    let mut readings: Vec<Reading> = Vec::with_capacity(items.len());
    for item in items {
        if readings.iter().any(|r| r.city == item.city) {
            warn!(city = %item.city, "Dropping duplicate city in model response");
            continue;
        }

        readings.push(Reading {
            city: item.city,
            aqi: item.aqi,
            temperature: item.temperature,
            condition: item.condition,
            humidity: item.humidity,
            wind_speed: item.wind_speed,
            pollutants: item.pollutants,
            last_updated: last_updated.to_string(),
        });
    }

    readings.sort_by_key(|r| r.city);
    Ok(readings)
}
