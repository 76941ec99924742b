//! AQI classification.
//!
//! Thresholds are inclusive upper bounds. Any integer is accepted; values below
//! zero fall into [`AqiCategory::Good`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl AqiCategory {
    pub fn from_aqi(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Satisfactory,
            101..=150 => AqiCategory::Moderate,
            151..=200 => AqiCategory::Poor,
            201..=300 => AqiCategory::VeryPoor,
            _ => AqiCategory::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }

    /// Display color name for badges.
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "emerald",
            AqiCategory::Satisfactory => "yellow",
            AqiCategory::Moderate => "orange",
            AqiCategory::Poor => "red",
            AqiCategory::VeryPoor => "purple",
            AqiCategory::Severe => "rose",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn color_category(aqi: i32) -> AqiCategory {
    AqiCategory::from_aqi(aqi)
}

pub fn label(aqi: i32) -> &'static str {
    AqiCategory::from_aqi(aqi).label()
}

/// Health recommendation shown next to the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthAdvice {
    Good,
    ModeratePollution,
}

impl HealthAdvice {
    pub fn headline(&self) -> &'static str {
        match self {
            HealthAdvice::Good => "Air quality is good",
            HealthAdvice::ModeratePollution => "Moderate air pollution",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            HealthAdvice::Good => {
                "Perfect for outdoor activities and exercise. No special precautions needed."
            }
            HealthAdvice::ModeratePollution => {
                "Sensitive groups should reduce prolonged outdoor exertion. Consider wearing a mask."
            }
        }
    }
}

pub fn health_advice(aqi: i32) -> HealthAdvice {
    if aqi <= 100 {
        HealthAdvice::Good
    } else {
        HealthAdvice::ModeratePollution
    }
}

pub const QUICK_TIPS: [&str; 3] = [
    "Keep windows closed during peak traffic hours",
    "Use air purifiers if living near industrial zones",
    "Stay hydrated to help your body process pollutants",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_boundaries() {
        let cases = [
            (50, AqiCategory::Good),
            (51, AqiCategory::Satisfactory),
            (100, AqiCategory::Satisfactory),
            (101, AqiCategory::Moderate),
            (150, AqiCategory::Moderate),
            (151, AqiCategory::Poor),
            (200, AqiCategory::Poor),
            (201, AqiCategory::VeryPoor),
            (300, AqiCategory::VeryPoor),
            (301, AqiCategory::Severe),
        ];

        for (aqi, expected) in cases {
            assert_eq!(color_category(aqi), expected, "aqi {aqi}");
        }
    }

    #[test]
    fn negative_and_extreme_values() {
        assert_eq!(color_category(-5), AqiCategory::Good);
        assert_eq!(color_category(i32::MIN), AqiCategory::Good);
        assert_eq!(color_category(0), AqiCategory::Good);
        assert_eq!(color_category(i32::MAX), AqiCategory::Severe);
    }

    #[test]
    fn labels_follow_categories() {
        assert_eq!(label(10), "Good");
        assert_eq!(label(75), "Satisfactory");
        assert_eq!(label(125), "Moderate");
        assert_eq!(label(175), "Poor");
        assert_eq!(label(250), "Very Poor");
        assert_eq!(label(999), "Severe");
    }

    #[test]
    fn classification_is_stable() {
        for aqi in [-1, 42, 100, 101, 300, 301] {
            assert_eq!(color_category(aqi), color_category(aqi));
            assert_eq!(label(aqi), label(aqi));
        }
    }

    #[test]
    fn health_advice_splits_at_100() {
        assert_eq!(health_advice(100), HealthAdvice::Good);
        assert_eq!(health_advice(101), HealthAdvice::ModeratePollution);
        assert_eq!(health_advice(-20), HealthAdvice::Good);
        assert!(health_advice(150).detail().contains("mask"));
    }
}
