use super::crop::{CropDefinition, FarmingMode, WaterRequirement};
use super::region::Region;
use super::season::Season;
use chrono::Month;
use serde::{Deserialize, Serialize, Serializer};

/// Score contributions used to rank recommended crops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub season: u32,
    pub region: u32,
    pub greenhouse: u32,
    pub open_field: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            season: 2,
            region: 2,
            greenhouse: 1,
            open_field: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationContext {
    pub farming_mode: Option<FarmingMode>,
    /// `None` disables region filtering
    pub region: Option<Region>,
    pub season: Season,
}

impl RecommendationContext {
    pub fn new(farming_mode: Option<FarmingMode>, region: Option<Region>, season: Season) -> Self {
        Self {
            farming_mode,
            region,
            season,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCrop<'a> {
    #[serde(flatten)]
    pub crop: &'a CropDefinition,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantingCalendar {
    pub crop: String,
    #[serde(serialize_with = "serialize_months")]
    pub best_planting_months: Vec<Month>,
    #[serde(serialize_with = "serialize_month")]
    pub next_planting_month: Option<Month>,
    pub growth_duration_days: u32,
    pub tips: String,
    pub water_requirement: WaterRequirement,
}

impl PlantingCalendar {
    pub fn best_planting_month_names(&self) -> Vec<&'static str> {
        self.best_planting_months.iter().map(|m| m.name()).collect()
    }

    pub fn next_planting_month_name(&self) -> Option<&'static str> {
        self.next_planting_month.map(|m| m.name())
    }
}

fn serialize_months<S: Serializer>(months: &[Month], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(months.iter().map(|m| m.name()))
}

fn serialize_month<S: Serializer>(
    month: &Option<Month>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match month {
        Some(m) => serializer.serialize_some(m.name()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let w = ScoringWeights::default();
        assert_eq!((w.season, w.region, w.greenhouse, w.open_field), (2, 2, 1, 1));
    }

    #[test]
    fn partial_weights_fill_from_defaults() {
        let w: ScoringWeights = serde_yaml::from_str("region: 5").unwrap();
        assert_eq!(w.region, 5);
        assert_eq!(w.season, 2);
        assert_eq!(w.open_field, 1);
    }

    #[test]
    fn calendar_serializes_month_names() {
        let calendar = PlantingCalendar {
            crop: "Wheat".into(),
            best_planting_months: vec![Month::April, Month::May],
            next_planting_month: None,
            growth_duration_days: 120,
            tips: String::new(),
            water_requirement: WaterRequirement::Medium,
        };
        let value = serde_json::to_value(&calendar).unwrap();
        assert_eq!(value["best_planting_months"], serde_json::json!(["April", "May"]));
        assert!(value["next_planting_month"].is_null());
        assert_eq!(value["water_requirement"], "medium");
    }
}
