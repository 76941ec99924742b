//! Dashboard state: the latest readings and the selected city.

use tracing::debug;

use crate::{
    fetch::{DataProvider, time_of_day},
    model::{City, Reading},
};

/// Owns everything the presentation layer shows between refreshes.
///
/// `refresh` takes `&mut self`, so one dashboard never has two fetches in flight.
/// Dropping the future returned by `refresh` abandons that fetch and leaves the
/// previous readings in place.
#[derive(Debug)]
pub struct Dashboard {
    provider: DataProvider,
    readings: Vec<Reading>,
    selected: Option<City>,
    last_refreshed: Option<String>,
}

impl Dashboard {
    pub fn new(provider: DataProvider) -> Self {
        Self { provider, readings: Vec::new(), selected: None, last_refreshed: None }
    }

    /// Replaces the readings with a fresh fetch.
    ///
    /// The selection is kept when the selected city is still present; otherwise
    /// the first reading becomes selected.
    pub async fn refresh(&mut self) -> &[Reading] {
        let readings = self.provider.fetch_readings().await;
        self.apply(readings);
        &self.readings
    }

    fn apply(&mut self, readings: Vec<Reading>) {
        self.readings = readings;
        self.last_refreshed = Some(time_of_day());

        let still_present = self.selected.is_some_and(|city| self.reading(city).is_some());
        if !still_present {
            self.selected = self.readings.first().map(|r| r.city);
        }

        debug!(count = self.readings.len(), selected = ?self.selected, "Dashboard refreshed");
    }

    /// Selects `city` if it has a reading; otherwise the selection is unchanged.
    pub fn select(&mut self, city: City) -> Option<&Reading> {
        if self.reading(city).is_some() {
            self.selected = Some(city);
        }
        self.reading(city)
    }

    pub fn selected(&self) -> Option<&Reading> {
        self.selected.and_then(|city| self.reading(city))
    }

    pub fn reading(&self, city: City) -> Option<&Reading> {
        self.readings.iter().find(|r| r.city == city)
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn last_refreshed(&self) -> Option<&str> {
        self.last_refreshed.as_deref()
    }
}
