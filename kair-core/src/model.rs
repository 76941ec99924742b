use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The fixed set of monitored cities, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Bengaluru,
    Mysuru,
    Hubballi,
    Mangaluru,
    Belagavi,
    Kalaburagi,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Bengaluru,
        City::Mysuru,
        City::Hubballi,
        City::Mangaluru,
        City::Belagavi,
        City::Kalaburagi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Bengaluru => "Bengaluru",
            City::Mysuru => "Mysuru",
            City::Hubballi => "Hubballi",
            City::Mangaluru => "Mangaluru",
            City::Belagavi => "Belagavi",
            City::Kalaburagi => "Kalaburagi",
        }
    }

    pub const fn all() -> &'static [City] {
        &Self::ALL
    }

    /// Region shown under the city name.
    pub fn region(&self) -> &'static str {
        "Karnataka"
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();

        City::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown city '{value}'. Supported cities: {}.",
                    City::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

impl Serialize for City {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for City {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Pollutant sub-indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
}

/// One city's weather and air-quality snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub city: City,
    #[serde(deserialize_with = "integral_number")]
    pub aqi: i32,
    pub temperature: f64,
    pub condition: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pollutants: Pollutants,
    pub last_updated: String,
}

/// Accepts `42` as well as `42.0` or `41.6`; the model does not always emit integers.
pub(crate) fn integral_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if !n.is_finite() || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
        return Err(serde::de::Error::custom(format!("aqi out of range: {n}")));
    }
    Ok(n.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_as_str_roundtrip() {
        for city in City::all() {
            let parsed: City = city.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*city, parsed);
        }
    }

    #[test]
    fn city_parse_is_case_insensitive() {
        assert_eq!("mysuru".parse::<City>().unwrap(), City::Mysuru);
        assert_eq!(" BELAGAVI ".parse::<City>().unwrap(), City::Belagavi);
    }

    #[test]
    fn unknown_city_error() {
        let err = "Mumbai".parse::<City>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown city 'Mumbai'"));
        assert!(msg.contains("Kalaburagi"));
    }

    #[test]
    fn reading_uses_camel_case_keys() {
        let reading = Reading {
            city: City::Hubballi,
            aqi: 77,
            temperature: 30.0,
            condition: "Sunny".into(),
            humidity: 50.0,
            wind_speed: 12.0,
            pollutants: Pollutants { pm25: 1.0, pm10: 2.0, no2: 3.0, o3: 4.0 },
            last_updated: "10:00:00 AM".into(),
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["city"], "Hubballi");
        assert_eq!(json["windSpeed"], 12.0);
        assert_eq!(json["lastUpdated"], "10:00:00 AM");
    }

    #[test]
    fn aqi_accepts_fractional_numbers() {
        let json = r#"{"city":"Mysuru","aqi":41.6,"temperature":28,"condition":"Haze",
            "humidity":60,"windSpeed":9,"pollutants":{"pm25":1,"pm10":2,"no2":3,"o3":4},
            "lastUpdated":"x"}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.aqi, 42);
    }
}
