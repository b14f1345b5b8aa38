pub mod drought;
pub mod engine;
pub mod heavy_rain;
pub mod high_temperature;

pub use engine::AdvisoryEngine;

use crate::error::{AgroError, Result};
use crate::models::{FarmingMode, WeatherAlert, WeatherSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest drought window, in forecast days
pub const MAX_DROUGHT_WINDOW_DAYS: usize = 16;

/// Trigger levels shared by the advisory rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryThresholds {
    /// Current temperature (°C) above which heat guidance is issued
    pub high_temp_c: f64,
    /// First-day precipitation probability above which rain guidance is issued
    pub heavy_rain_probability: f64,
    /// Mean precipitation probability below which drought is considered
    pub drought_probability: f64,
    /// Current humidity (%) below which drought is considered
    pub drought_humidity_percent: f64,
    /// Forecast days averaged for the drought rule
    pub drought_window_days: usize,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            high_temp_c: 35.0,
            heavy_rain_probability: 0.7,
            drought_probability: 0.1,
            drought_humidity_percent: 40.0,
            drought_window_days: 5,
        }
    }
}

impl AdvisoryThresholds {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_DROUGHT_WINDOW_DAYS).contains(&self.drought_window_days) {
            return Err(AgroError::Config(format!(
                "drought_window_days must be between 1 and {}, got {}",
                MAX_DROUGHT_WINDOW_DAYS, self.drought_window_days
            )));
        }
        Ok(())
    }
}

/// Trait for weather advisory rules
pub trait AdvisoryRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name, also used as the alert event
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an alert if conditions are met
    fn evaluate(
        &self,
        snapshot: &WeatherSnapshot,
        farming_mode: Option<FarmingMode>,
        thresholds: &AdvisoryThresholds,
        now: DateTime<Utc>,
    ) -> Option<WeatherAlert>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{CurrentConditions, DailyForecast, WeatherSnapshot};
    use chrono::{DateTime, Utc};

    pub fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    pub fn snapshot(temp_c: f64, humidity_percent: f64, pops: &[f64]) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temp_c,
                humidity_percent,
                wind_speed_mps: 3.0,
                condition_code: 800,
            },
            daily: pops
                .iter()
                .map(|pop| DailyForecast {
                    precipitation_prob: *pop,
                    temp_max_c: temp_c + 2.0,
                    temp_min_c: temp_c - 10.0,
                    condition_code: 800,
                })
                .collect(),
            alerts: Vec::new(),
        }
    }
}
