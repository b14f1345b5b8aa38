use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions plus daily forecast, in metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
    /// Alerts issued by the weather provider
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
}

impl WeatherSnapshot {
    /// Precipitation probability of the first forecast day
    pub fn first_day_precipitation_prob(&self) -> Option<f64> {
        self.daily.first().map(|d| d.precipitation_prob)
    }

    /// Mean precipitation probability over the first `days` forecast days.
    /// Averages over the days actually present; `None` without any.
    pub fn mean_precipitation_prob(&self, days: usize) -> Option<f64> {
        let window = &self.daily[..days.min(self.daily.len())];
        if window.is_empty() {
            return None;
        }
        Some(window.iter().map(|d| d.precipitation_prob).sum::<f64>() / window.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub humidity_percent: f64,
    #[serde(default)]
    pub wind_speed_mps: f64,
    #[serde(default = "default_condition_code")]
    pub condition_code: u32,
}

impl CurrentConditions {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.condition_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub precipitation_prob: f64, // 0.0-1.0
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    #[serde(default = "default_condition_code")]
    pub condition_code: u32,
}

impl DailyForecast {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.condition_code)
    }
}

fn default_condition_code() -> u32 {
    800
}

/// Advisory alert, either passed through from the provider or derived locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub event: String,
    pub description: String,
    /// Epoch seconds
    pub start: i64,
    /// Epoch seconds
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
}

impl WeatherAlert {
    /// Alert valid from `now` for `duration`.
    pub fn new(
        event: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            event: event.into(),
            description: description.into(),
            start: now.timestamp(),
            end: (now + duration).timestamp(),
            sender_name: None,
        }
    }
}

/// Coarse sky condition, classified from the provider's condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Mist,
    Fog,
    Clear,
    Clouds,
    Other,
}

impl WeatherCondition {
    /// Codes are grouped by hundreds: 2xx thunderstorm, 3xx drizzle, 5xx rain,
    /// 6xx snow, 7xx atmosphere (741 fog), 800 clear, 80x clouds.
    pub fn from_code(code: u32) -> Self {
        match (code / 100, code) {
            (2, _) => WeatherCondition::Thunderstorm,
            (3, _) => WeatherCondition::Drizzle,
            (5, _) => WeatherCondition::Rain,
            (6, _) => WeatherCondition::Snow,
            (7, 741) => WeatherCondition::Fog,
            (7, _) => WeatherCondition::Mist,
            (8, 800) => WeatherCondition::Clear,
            (8, _) => WeatherCondition::Clouds,
            _ => WeatherCondition::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Thunderstorm => "thunderstorm",
            WeatherCondition::Drizzle => "drizzle",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Snow => "snow",
            WeatherCondition::Mist => "mist",
            WeatherCondition::Fog => "fog",
            WeatherCondition::Clear => "clear sky",
            WeatherCondition::Clouds => "cloudy",
            WeatherCondition::Other => "unsettled",
        }
    }

    pub fn is_wet(&self) -> bool {
        matches!(
            self,
            WeatherCondition::Thunderstorm
                | WeatherCondition::Drizzle
                | WeatherCondition::Rain
                | WeatherCondition::Snow
        )
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(pop: f64) -> DailyForecast {
        DailyForecast {
            precipitation_prob: pop,
            temp_max_c: 30.0,
            temp_min_c: 15.0,
            condition_code: 800,
        }
    }

    fn snapshot(pops: &[f64]) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temp_c: 25.0,
                humidity_percent: 50.0,
                wind_speed_mps: 2.0,
                condition_code: 800,
            },
            daily: pops.iter().map(|p| day(*p)).collect(),
            alerts: Vec::new(),
        }
    }

    #[test]
    fn condition_codes_group_by_hundreds() {
        assert_eq!(WeatherCondition::from_code(211), WeatherCondition::Thunderstorm);
        assert_eq!(WeatherCondition::from_code(311), WeatherCondition::Drizzle);
        assert_eq!(WeatherCondition::from_code(502), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_code(601), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_code(721), WeatherCondition::Mist);
        assert_eq!(WeatherCondition::from_code(741), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_code(800), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_code(804), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::from_code(0), WeatherCondition::Other);
        assert_eq!(WeatherCondition::from_code(950), WeatherCondition::Other);
    }

    #[test]
    fn wet_conditions() {
        assert!(WeatherCondition::Rain.is_wet());
        assert!(WeatherCondition::Thunderstorm.is_wet());
        assert!(!WeatherCondition::Fog.is_wet());
        assert!(!WeatherCondition::Clouds.is_wet());
    }

    #[test]
    fn mean_precipitation_uses_actual_day_count() {
        let short = snapshot(&[0.2, 0.4]);
        let mean = short.mean_precipitation_prob(5).unwrap();
        assert!((mean - 0.3).abs() < 1e-9);

        let long = snapshot(&[0.1, 0.1, 0.1, 0.1, 0.1, 0.9, 0.9]);
        let mean = long.mean_precipitation_prob(5).unwrap();
        assert!((mean - 0.1).abs() < 1e-9);
    }

    #[test]
    fn empty_forecast_has_no_precipitation_figures() {
        let empty = snapshot(&[]);
        assert!(empty.first_day_precipitation_prob().is_none());
        assert!(empty.mean_precipitation_prob(5).is_none());
    }

    #[test]
    fn alert_window() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let alert = WeatherAlert::new("Test", "desc", now, Duration::days(1));
        assert_eq!(alert.start, 1_700_000_000);
        assert_eq!(alert.end, 1_700_086_400);
    }

    #[test]
    fn snapshot_defaults_missing_sections() {
        let json = r#"{"current": {"temp_c": 21.5, "humidity_percent": 60}}"#;
        let snapshot: WeatherSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.daily.is_empty());
        assert!(snapshot.alerts.is_empty());
        assert_eq!(snapshot.current.condition(), WeatherCondition::Clear);
    }
}
