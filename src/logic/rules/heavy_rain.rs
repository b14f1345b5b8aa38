use super::{AdvisoryRule, AdvisoryThresholds};
use crate::models::{FarmingMode, WeatherAlert, WeatherSnapshot};
use chrono::{DateTime, Duration, Utc};

/// Heavy rain rule - drainage guidance ahead of a wet day
///
/// Conditions:
/// - First forecast day precipitation probability above 70%
///
/// Not evaluated without forecast days. Valid for 24 hours.
pub struct HeavyRainRule;

impl AdvisoryRule for HeavyRainRule {
    fn id(&self) -> &'static str {
        "heavy_rain"
    }

    fn name(&self) -> &'static str {
        "Heavy Rain Alert"
    }

    fn evaluate(
        &self,
        snapshot: &WeatherSnapshot,
        farming_mode: Option<FarmingMode>,
        thresholds: &AdvisoryThresholds,
        now: DateTime<Utc>,
    ) -> Option<WeatherAlert> {
        let pop = snapshot.first_day_precipitation_prob()?;
        if pop <= thresholds.heavy_rain_probability {
            return None;
        }

        let description = match farming_mode {
            Some(FarmingMode::Greenhouse) => {
                "Heavy rainfall expected. Check greenhouse drainage systems."
            }
            _ => {
                "Heavy rainfall expected. Consider drainage for your fields and delay any \
                 chemical applications."
            }
        };

        Some(WeatherAlert::new(
            self.name(),
            description,
            now,
            Duration::days(1),
        ))
    }
}
