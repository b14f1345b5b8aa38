use super::{AdvisoryRule, AdvisoryThresholds};
use crate::models::{FarmingMode, WeatherAlert, WeatherSnapshot};
use chrono::{DateTime, Duration, Utc};

/// High temperature rule - heat guidance for the coming day
///
/// Conditions:
/// - Current temperature above 35°C
///
/// Greenhouses get ventilation and shade advice; everything else gets
/// irrigation timing advice. Valid for 24 hours.
pub struct HighTemperatureRule;

impl AdvisoryRule for HighTemperatureRule {
    fn id(&self) -> &'static str {
        "high_temperature"
    }

    fn name(&self) -> &'static str {
        "High Temperature Alert"
    }

    fn evaluate(
        &self,
        snapshot: &WeatherSnapshot,
        farming_mode: Option<FarmingMode>,
        thresholds: &AdvisoryThresholds,
        now: DateTime<Utc>,
    ) -> Option<WeatherAlert> {
        if snapshot.current.temp_c <= thresholds.high_temp_c {
            return None;
        }

        let description = match farming_mode {
            Some(FarmingMode::Greenhouse) => {
                "Extremely high temperatures detected. Ensure proper ventilation in your \
                 greenhouse and consider shade cloth."
            }
            _ => {
                "Extremely high temperatures detected. Consider irrigating crops during \
                 cooler parts of the day."
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::{now, snapshot};

    #[test]
    fn fires_above_threshold() {
        let alert = HighTemperatureRule
            .evaluate(
                &snapshot(38.0, 50.0, &[0.3]),
                Some(FarmingMode::OpenField),
                &AdvisoryThresholds::default(),
                now(),
            )
            .unwrap();
        assert_eq!(alert.event, "High Temperature Alert");
        assert!(alert.description.contains("irrigating"));
        assert_eq!(alert.end - alert.start, 86_400);
    }

    #[test]
    fn threshold_is_exclusive() {
        let alert = HighTemperatureRule.evaluate(
            &snapshot(35.0, 50.0, &[0.3]),
            Some(FarmingMode::OpenField),
            &AdvisoryThresholds::default(),
            now(),
        );
        assert!(alert.is_none());
    }

    #[test]
    fn greenhouse_gets_ventilation_advice() {
        let alert = HighTemperatureRule
            .evaluate(
                &snapshot(40.0, 50.0, &[]),
                Some(FarmingMode::Greenhouse),
                &AdvisoryThresholds::default(),
                now(),
            )
            .unwrap();
        assert!(alert.description.contains("ventilation"));
    }

    #[test]
    fn missing_mode_gets_field_advice() {
        let alert = HighTemperatureRule
            .evaluate(
                &snapshot(40.0, 50.0, &[]),
                None,
                &AdvisoryThresholds::default(),
                now(),
            )
            .unwrap();
        assert!(alert.description.contains("irrigating"));
    }
}
