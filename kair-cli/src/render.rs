//! Terminal rendering of the dashboard.

use std::fmt;

use console::{StyledObject, style};
use kair_core::{
    AqiCategory, Dashboard, Reading, classify::QUICK_TIPS, color_category, health_advice,
};

const BAR_WIDTH: usize = 24;

/// Pollutant rows with the value that fills a whole bar.
fn pollutant_rows(reading: &Reading) -> [(&'static str, f64, f64); 4] {
    let p = &reading.pollutants;
    [("PM2.5", p.pm25, 100.0), ("PM10", p.pm10, 150.0), ("NO2", p.no2, 80.0), ("O3", p.o3, 120.0)]
}

fn paint<D>(category: AqiCategory, value: D) -> StyledObject<D> {
    let styled = style(value).bold();
    match category {
        AqiCategory::Good => styled.green(),
        AqiCategory::Satisfactory => styled.yellow(),
        AqiCategory::Moderate => styled.color256(208),
        AqiCategory::Poor => styled.red(),
        AqiCategory::VeryPoor => styled.magenta(),
        AqiCategory::Severe => styled.color256(88),
    }
}

pub fn bar(value: f64, full: f64) -> String {
    let ratio = if full > 0.0 { (value / full).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn card(reading: &Reading, selected: bool) -> Card<'_> {
    Card { reading, selected }
}

/// One city tile; the selected one is marked with `▶`.
pub struct Card<'a> {
    reading: &'a Reading,
    selected: bool,
}

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = self.reading;
        let category = color_category(reading.aqi);
        let marker = if self.selected { "▶" } else { " " };

        writeln!(
            f,
            "{marker} {:<28} {}",
            style(reading.city.as_str()).bold(),
            paint(category, format!("AQI {}", reading.aqi))
        )?;
        writeln!(f, "  {}", style(reading.city.region().to_uppercase()).dim())?;
        writeln!(f, "  {}°C   {}", reading.temperature, reading.condition)?;
        writeln!(
            f,
            "  {}%  {} km/h   {}",
            reading.humidity,
            reading.wind_speed,
            paint(category, category.label().to_uppercase())
        )
    }
}

pub fn detail(reading: &Reading) -> Detail<'_> {
    Detail(reading)
}

pub struct Detail<'a>(&'a Reading);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = self.0;
        let category = color_category(reading.aqi);
        let advice = health_advice(reading.aqi);

        writeln!(f, "{}", style(reading.city.as_str()).bold().underlined())?;
        writeln!(f, "{}", style("Real-time environmental status").dim())?;
        writeln!(f, "{}°  {}", reading.temperature, reading.condition)?;
        writeln!(f)?;
        writeln!(f, "Air Quality Index  {}  {}", paint(category, reading.aqi), category.label())?;
        writeln!(f, "Humidity           {}%", reading.humidity)?;
        writeln!(f, "Wind Speed         {} km/h", reading.wind_speed)?;
        writeln!(f)?;

        writeln!(f, "{}", style("Pollutant breakdown").bold())?;
        for (name, value, full) in pollutant_rows(reading) {
            writeln!(f, "  {name:<6} {} {value}", bar(value, full))?;
        }
        writeln!(f)?;

        writeln!(f, "{}", style("Health recommendations").bold())?;
        writeln!(f, "  {}", paint(category, advice.headline()))?;
        writeln!(f, "  {}", advice.detail())?;
        writeln!(f)?;

        writeln!(f, "{}", style("Quick tips").bold())?;
        for tip in QUICK_TIPS {
            writeln!(f, "  • {tip}")?;
        }

        Ok(())
    }
}

pub fn dashboard(dash: &Dashboard) -> Screen<'_> {
    Screen(dash)
}

/// Header, every city card, then the selected city's details.
pub struct Screen<'a>(&'a Dashboard);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.0;
        let selected = dash.selected().map(|r| r.city);

        writeln!(f, "{}  {}", style("K-Air Monitor").bold(), style("Karnataka, India").dim())?;
        writeln!(
            f,
            "{}",
            style(format!("Last update: {}", dash.last_refreshed().unwrap_or("never"))).dim()
        )?;
        writeln!(f)?;

        for reading in dash.readings() {
            writeln!(f, "{}", card(reading, Some(reading.city) == selected))?;
        }

        match dash.selected() {
            Some(reading) => write!(f, "{}", detail(reading)),
            None => writeln!(f, "Select a city to see detailed environmental data."),
        }
    }
}

pub fn classification(aqi: i32) -> String {
    let category = color_category(aqi);
    let advice = health_advice(aqi);

    format!(
        "AQI {}: {} ({})\n{}\n{}\n",
        aqi,
        paint(category, category.label()),
        category.color(),
        advice.headline(),
        advice.detail()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kair_core::{City, DataProvider, Pollutants, provider::offline::OfflineProvider};
    use std::fmt::Write as _;

    fn reading(aqi: i32) -> Reading {
        Reading {
            city: City::Mangaluru,
            aqi,
            temperature: 29.0,
            condition: "Humid".into(),
            humidity: 78.0,
            wind_speed: 14.0,
            pollutants: Pollutants { pm25: 50.0, pm10: 150.0, no2: 0.0, o3: 240.0 },
            last_updated: "8:15:00 AM".into(),
        }
    }

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(0.0, 100.0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(100.0, 100.0), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(500.0, 100.0), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(-3.0, 100.0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(50.0, 100.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn card_shows_city_aqi_and_label() {
        let text = card(&reading(120), true).to_string();
        assert!(text.contains("Mangaluru"));
        assert!(text.contains("AQI 120"));
        assert!(text.contains("MODERATE"));
        assert!(text.contains("KARNATAKA"));
        assert!(text.contains("29°C"));
        assert!(text.contains("14 km/h"));
        assert!(text.starts_with('▶'));
    }

    #[test]
    fn detail_switches_advice_at_100() {
        assert!(detail(&reading(100)).to_string().contains("Air quality is good"));
        assert!(detail(&reading(101)).to_string().contains("Moderate air pollution"));
    }

    #[test]
    fn detail_lists_pollutants_and_tips() {
        let text = detail(&reading(40)).to_string();
        for name in ["PM2.5", "PM10", "NO2", "O3"] {
            assert!(text.contains(name));
        }
        for tip in QUICK_TIPS {
            assert!(text.contains(tip));
        }
    }

    /// Accepts a fixed number of bytes, then refuses.
    struct Capped(usize);

    impl fmt::Write for Capped {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0 = self.0.checked_sub(s.len()).ok_or(fmt::Error)?;
            Ok(())
        }
    }

    #[test]
    fn write_errors_propagate() {
        let r = reading(40);
        assert!(write!(Capped(usize::MAX), "{}", detail(&r)).is_ok());
        assert!(write!(Capped(10), "{}", card(&r, false)).is_err());
        assert!(write!(Capped(10), "{}", detail(&r)).is_err());
    }

    #[tokio::test]
    async fn dashboard_lists_cards_then_detail() {
        let mut dash = Dashboard::new(DataProvider::new(Box::new(OfflineProvider)));
        assert!(dashboard(&dash).to_string().contains("Select a city"));

        dash.refresh().await;
        dash.select(City::Hubballi);
        let text = dashboard(&dash).to_string();

        for city in City::all() {
            assert!(text.contains(city.as_str()));
        }
        assert!(text.contains("▶"));
        assert!(text.contains("Quick tips"));
        assert!(!text.contains("never"));
        assert!(write!(Capped(40), "{}", dashboard(&dash)).is_err());
    }

    #[test]
    fn classification_names_category() {
        let text = classification(250);
        assert!(text.contains("AQI 250"));
        assert!(text.contains("Very Poor"));
        assert!(text.contains("purple"));
        assert!(text.contains("Moderate air pollution"));
    }
}
