//! The data provider: live readings from the search collaborator, or placeholders.

use chrono::Local;
use tracing::{info, warn};

use crate::{
    decode::decode_readings,
    error::FetchError,
    fallback::synthetic_readings,
    model::{City, Reading},
    provider::SearchProvider,
};

/// Builds the request sent to the search collaborator for `cities`.
pub fn build_prompt(cities: &[City]) -> String {
    let names = cities.iter().map(City::as_str).collect::<Vec<_>>().join(", ");

    format!(
        "Fetch the current real-time weather and air quality index (AQI) data for the following \
         cities in Karnataka, India: {names}.\n\
         For each city, provide:\n\
         1. AQI (numeric)\n\
         2. Temperature in Celsius\n\
         3. Weather condition (e.g., Sunny, Cloudy, Rainy)\n\
         4. Humidity percentage\n\
         5. Wind speed in km/h\n\
         6. PM2.5, PM10, NO2, and O3 pollutant levels if available.\n\n\
         Return the data strictly as a JSON array of objects with the following keys: city, aqi, \
         temperature, condition, humidity, windSpeed, pollutants (object with pm25, pm10, no2, o3).\n\
         Ensure the data is current."
    )
}

/// Local time of day used for `last_updated`, e.g. `3:07:42 PM`.
pub fn time_of_day() -> String {
    Local::now().format("%-I:%M:%S %p").to_string()
}

#[derive(Debug)]
pub struct DataProvider {
    source: Box<dyn SearchProvider>,
}

impl DataProvider {
    pub fn new(source: Box<dyn SearchProvider>) -> Self {
        Self { source }
    }

    /// Live path only; the error says why no readings were produced.
    pub async fn try_fetch(&self) -> Result<Vec<Reading>, FetchError> {
        let prompt = build_prompt(City::all());
        let text = self.source.search(&prompt).await?;
        decode_readings(&text, &time_of_day())
    }

    /// Readings for the dashboard. Never fails: any error yields placeholder data
    /// for every city.
    pub async fn fetch_readings(&self) -> Vec<Reading> {
        match self.try_fetch().await {
            Ok(readings) => {
                info!(provider = %self.source.id(), count = readings.len(), "Fetched live readings");
                readings
            }
            Err(err) => {
                warn!(provider = %self.source.id(), error = %err, "Fetch failed, using placeholder readings");
                synthetic_readings(&mut rand::rng(), &time_of_day())
            }
        }
    }
}
