use super::{AdvisoryRule, AdvisoryThresholds, MAX_DROUGHT_WINDOW_DAYS};
use crate::models::{FarmingMode, WeatherAlert, WeatherSnapshot};
use chrono::{DateTime, Duration, Utc};

/// Drought rule - water conservation guidance for a dry spell
///
/// Conditions:
/// - Mean precipitation probability over the first 5 forecast days below 10%
/// - Current humidity below 40%
///
/// The mean is taken over the days actually available when the forecast is
/// shorter than the window. Not evaluated without forecast days. Valid for
/// the length of the window, capped at `MAX_DROUGHT_WINDOW_DAYS`.
pub struct DroughtRule;

impl AdvisoryRule for DroughtRule {
    fn id(&self) -> &'static str {
        "drought"
    }

    fn name(&self) -> &'static str {
        "Drought Conditions"
    }

    fn evaluate(
        &self,
        snapshot: &WeatherSnapshot,
        _farming_mode: Option<FarmingMode>,
        thresholds: &AdvisoryThresholds,
        now: DateTime<Utc>,
    ) -> Option<WeatherAlert> {
        let window = thresholds.drought_window_days.min(MAX_DROUGHT_WINDOW_DAYS);
        let mean_pop = snapshot.mean_precipitation_prob(window)?;

        if mean_pop >= thresholds.drought_probability
            || snapshot.current.humidity_percent >= thresholds.drought_humidity_percent
        {
            return None;
        }

        let description = format!(
            "Low rainfall and humidity expected for the next {} days. \
             Consider water conservation measures.",
            window
        );

        Some(WeatherAlert::new(
            self.name(),
            description,
            now,
            Duration::days(window as i64),
        ))
    }
}
