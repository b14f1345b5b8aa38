use super::{
    drought::DroughtRule, heavy_rain::HeavyRainRule, high_temperature::HighTemperatureRule,
    AdvisoryRule, AdvisoryThresholds,
};
use crate::models::{FarmingMode, WeatherAlert, WeatherSnapshot};
use chrono::{DateTime, Utc};

pub struct AdvisoryEngine {
    rules: Vec<Box<dyn AdvisoryRule>>,
    thresholds: AdvisoryThresholds,
}

impl AdvisoryEngine {
    pub fn new(thresholds: AdvisoryThresholds) -> Self {
        // Evaluation order is the order derived alerts are reported in.
        let rules: Vec<Box<dyn AdvisoryRule>> = vec![
            Box::new(HighTemperatureRule),
            Box::new(HeavyRainRule),
            Box::new(DroughtRule),
        ];

        Self { rules, thresholds }
    }

    /// Provider alerts first, in their original order, followed by every
    /// derived alert in rule order.
    pub fn derive_alerts(
        &self,
        snapshot: &WeatherSnapshot,
        farming_mode: Option<FarmingMode>,
        now: DateTime<Utc>,
    ) -> Vec<WeatherAlert> {
        let mut alerts = snapshot.alerts.clone();
        alerts.extend(
            self.rules
                .iter()
                .filter_map(|rule| rule.evaluate(snapshot, farming_mode, &self.thresholds, now)),
        );
        alerts
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new(AdvisoryThresholds::default())
    }
}
