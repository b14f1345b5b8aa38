use super::calendar::build_calendar;
use super::catalog::CropCatalog;
use super::recommend::recommend;
use super::rules::{AdvisoryEngine, AdvisoryThresholds};
use crate::error::Result;
use crate::models::{
    resolve_season, FarmingMode, PlantingCalendar, RankedCrop, RecommendationContext, Region,
    RegionTable, ScoringWeights, WeatherAlert, WeatherSnapshot,
};
use chrono::{DateTime, Datelike, Utc};

/// Crop and weather advice over an injected catalog and region table.
///
/// Holds no mutable state; every call depends only on its arguments.
pub struct Advisor {
    catalog: CropCatalog,
    regions: RegionTable,
    weights: ScoringWeights,
    advisory: AdvisoryEngine,
}

impl Advisor {
    pub fn new(catalog: CropCatalog, regions: RegionTable) -> Self {
        Self {
            catalog,
            regions,
            weights: ScoringWeights::default(),
            advisory: AdvisoryEngine::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_thresholds(mut self, thresholds: AdvisoryThresholds) -> Self {
        self.advisory = AdvisoryEngine::new(thresholds);
        self
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn advisory(&self) -> &AdvisoryEngine {
        &self.advisory
    }

    pub fn resolve_region(&self, district: &str) -> Option<Region> {
        self.regions.resolve(district)
    }

    pub fn context(
        &self,
        farming_mode: Option<FarmingMode>,
        district: Option<&str>,
        as_of: impl Datelike,
    ) -> RecommendationContext {
        RecommendationContext::new(
            farming_mode,
            district.and_then(|d| self.resolve_region(d)),
            resolve_season(as_of),
        )
    }

    pub fn recommend(
        &self,
        farming_mode: Option<FarmingMode>,
        district: Option<&str>,
        as_of: impl Datelike,
    ) -> Result<Vec<RankedCrop<'_>>> {
        let context = self.context(farming_mode, district, as_of);
        recommend(&context, &self.catalog, &self.weights)
    }

    pub fn build_calendar(&self, crop_name: &str, as_of: impl Datelike) -> Result<PlantingCalendar> {
        build_calendar(crop_name, &self.catalog, as_of)
    }

    pub fn derive_alerts(
        &self,
        snapshot: &WeatherSnapshot,
        farming_mode: Option<FarmingMode>,
        now: DateTime<Utc>,
    ) -> Vec<WeatherAlert> {
        self.advisory.derive_alerts(snapshot, farming_mode, now)
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(CropCatalog::zimbabwe(), RegionTable::zimbabwe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgroError;
    use crate::models::{CurrentConditions, DailyForecast, Season};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn context_resolves_region_and_season() {
        let advisor = Advisor::default();
        let ctx = advisor.context(Some(FarmingMode::Greenhouse), Some("Gweru"), day(2025, 8, 1));
        assert_eq!(ctx.region, Some(Region::Region2));
        assert_eq!(ctx.season, Season::HotDry);

        let ctx = advisor.context(Some(FarmingMode::Greenhouse), Some("Nowhere"), day(2025, 8, 1));
        assert_eq!(ctx.region, None);

        let ctx = advisor.context(None, None, day(2025, 12, 25));
        assert_eq!(ctx.region, None);
        assert_eq!(ctx.season, Season::Rainy);
    }

    #[test]
    fn greenhouse_binga_rainy_is_empty() {
        let advisor = Advisor::default();
        let ranked = advisor
            .recommend(Some(FarmingMode::Greenhouse), Some("Binga"), day(2025, 1, 15))
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn open_field_binga_rainy_is_sorghum() {
        let advisor = Advisor::default();
        let ranked = advisor
            .recommend(Some(FarmingMode::OpenField), Some("Binga"), day(2025, 1, 15))
            .unwrap();
        let names: Vec<_> = ranked.iter().map(|r| r.crop.name.as_str()).collect();
        assert_eq!(names, vec!["Sorghum"]);
    }

    #[test]
    fn unknown_district_does_not_filter_by_region() {
        let advisor = Advisor::default();
        let with_unknown = advisor
            .recommend(Some(FarmingMode::OpenField), Some("Lupane"), day(2025, 5, 1))
            .unwrap();
        let without = advisor
            .recommend(Some(FarmingMode::OpenField), None, day(2025, 5, 1))
            .unwrap();
        assert_eq!(with_unknown, without);
        assert!(!with_unknown.is_empty());
    }

    #[test]
    fn custom_weights_change_scores() {
        let advisor = Advisor::default().with_weights(ScoringWeights {
            season: 10,
            region: 0,
            greenhouse: 0,
            open_field: 0,
        });
        let ranked = advisor
            .recommend(Some(FarmingMode::OpenField), Some("Harare"), day(2025, 4, 1))
            .unwrap();
        assert!(ranked.iter().all(|r| r.score == 10));
    }

    #[test]
    fn calendar_via_advisor() {
        let advisor = Advisor::default();
        let calendar = advisor.build_calendar("Wheat", day(2025, 10, 19)).unwrap();
        assert_eq!(calendar.best_planting_month_names(), vec!["April", "May"]);
        assert_eq!(calendar.growth_duration_days, 120);
        assert!(matches!(
            advisor.build_calendar("Unobtainium", day(2025, 10, 19)),
            Err(AgroError::NotFound(_))
        ));
    }

    #[test]
    fn custom_thresholds_apply() {
        let advisor = Advisor::default().with_thresholds(AdvisoryThresholds {
            high_temp_c: 25.0,
            ..Default::default()
        });
        let snapshot = WeatherSnapshot {
            current: CurrentConditions {
                temp_c: 28.0,
                humidity_percent: 70.0,
                wind_speed_mps: 1.0,
                condition_code: 801,
            },
            daily: vec![DailyForecast {
                precipitation_prob: 0.2,
                temp_max_c: 30.0,
                temp_min_c: 16.0,
                condition_code: 801,
            }],
            alerts: Vec::new(),
        };
        let now = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
        let alerts = advisor.derive_alerts(&snapshot, Some(FarmingMode::Greenhouse), now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event, "High Temperature Alert");
    }
}
