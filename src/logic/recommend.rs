use super::catalog::CropCatalog;
use crate::error::Result;
use crate::models::{CropDefinition, FarmingMode, RankedCrop, RecommendationContext, ScoringWeights};

/// Crops suited to the context, best first.
///
/// A crop is a candidate when:
/// - it grows in the context season
/// - it suits the farming mode (no mode matches nothing)
/// - it grows in the context region, when the region is known
///
/// Candidates are ordered by descending suitability score; equal scores keep
/// catalog order. An empty result is not an error.
pub fn recommend<'a>(
    context: &RecommendationContext,
    catalog: &'a CropCatalog,
    weights: &ScoringWeights,
) -> Result<Vec<RankedCrop<'a>>> {
    catalog.validate()?;

    let mut ranked: Vec<RankedCrop<'a>> = catalog
        .crops()
        .iter()
        .filter(|crop| is_candidate(crop, context))
        .map(|crop| RankedCrop {
            crop,
            score: suitability_score(crop, context, weights),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(ranked)
}

pub fn is_candidate(crop: &CropDefinition, context: &RecommendationContext) -> bool {
    crop.grows_in_season(context.season)
        && crop.suits_mode(context.farming_mode)
        && context
            .region
            .map_or(true, |region| crop.grows_in_region(region))
}

pub fn suitability_score(
    crop: &CropDefinition,
    context: &RecommendationContext,
    weights: &ScoringWeights,
) -> u32 {
    let mut score: u32 = 0;

    if crop.grows_in_season(context.season) {
        score = score.saturating_add(weights.season);
    }

    if let Some(region) = context.region {
        if crop.grows_in_region(region) {
            score = score.saturating_add(weights.region);
        }
    }

    match context.farming_mode {
        Some(FarmingMode::Greenhouse) if crop.greenhouse_suitable => {
            score = score.saturating_add(weights.greenhouse)
        }
        Some(FarmingMode::OpenField) if crop.open_field_suitable => {
            score = score.saturating_add(weights.open_field)
        }
        _ => {}
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Region, Season, WaterRequirement};

    fn names(ranked: &[RankedCrop<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.crop.name.clone()).collect()
    }

    fn synthetic(name: &str, regions: &[Region], seasons: &[Season], gh: bool, of: bool) -> CropDefinition {
        CropDefinition {
            name: name.into(),
            regions: regions.to_vec(),
            seasons: seasons.to_vec(),
            greenhouse_suitable: gh,
            open_field_suitable: of,
            water_requirement: WaterRequirement::Medium,
            growth_duration_days: 90,
            description: String::new(),
            tips: String::new(),
        }
    }

    #[test]
    fn open_field_rainy_region_two() {
        let catalog = CropCatalog::zimbabwe();
        let ctx = RecommendationContext::new(
            Some(FarmingMode::OpenField),
            Some(Region::Region2),
            Season::Rainy,
        );
        let ranked = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
        assert_eq!(
            names(&ranked),
            vec![
                "Maize",
                "Tomatoes",
                "Groundnuts",
                "Sweet Potatoes",
                "Beans",
                "Peppers"
            ]
        );
        assert!(ranked.iter().all(|r| r.score == 5));
    }

    #[test]
    fn results_respect_season_and_mode() {
        let catalog = CropCatalog::zimbabwe();
        for season in Season::ALL {
            for mode in [FarmingMode::Greenhouse, FarmingMode::OpenField] {
                for region in Region::ALL.iter().copied().map(Some).chain([None]) {
                    let ctx = RecommendationContext::new(Some(mode), region, season);
                    let ranked = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
                    for r in &ranked {
                        assert!(r.crop.grows_in_season(season));
                        assert!(r.crop.suits_mode(Some(mode)));
                        if let Some(region) = region {
                            assert!(r.crop.grows_in_region(region));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn greenhouse_in_binga_during_rains_is_empty() {
        let catalog = CropCatalog::zimbabwe();
        let ctx = RecommendationContext::new(
            Some(FarmingMode::Greenhouse),
            Some(Region::Region5),
            Season::Rainy,
        );
        let ranked = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn unknown_region_does_not_filter() {
        let catalog = CropCatalog::zimbabwe();
        let ctx = RecommendationContext::new(Some(FarmingMode::OpenField), None, Season::HotDry);
        let ranked = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
        assert_eq!(names(&ranked), vec!["Tomatoes", "Cabbage", "Peppers"]);
        assert!(ranked.iter().all(|r| r.score == 3));
    }

    #[test]
    fn missing_mode_matches_nothing() {
        let catalog = CropCatalog::zimbabwe();
        let ctx = RecommendationContext::new(None, Some(Region::Region2), Season::Rainy);
        let ranked = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let catalog = CropCatalog::new(vec![
            synthetic("A", &[Region::Region1], &[Season::Rainy], false, true),
            synthetic("B", &[Region::Region1], &[Season::Rainy], true, true),
            synthetic("C", &[Region::Region1], &[Season::Rainy], false, true),
            synthetic("D", &[Region::Region1], &[Season::Rainy], true, true),
        ])
        .unwrap();
        let weights = ScoringWeights {
            season: 1,
            region: 0,
            greenhouse: 10,
            open_field: 3,
        };

        let ctx = RecommendationContext::new(Some(FarmingMode::Greenhouse), None, Season::Rainy);
        let ranked = recommend(&ctx, &catalog, &weights).unwrap();
        assert_eq!(names(&ranked), vec!["B", "D"]);
        assert!(ranked.iter().all(|r| r.score == 11));

        let ctx = RecommendationContext::new(Some(FarmingMode::OpenField), None, Season::Rainy);
        let ranked = recommend(&ctx, &catalog, &weights).unwrap();
        assert_eq!(names(&ranked), vec!["A", "B", "C", "D"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn known_region_adds_region_weight() {
        let crop = synthetic("A", &[Region::Region3], &[Season::CoolDry], true, true);
        let weights = ScoringWeights::default();

        let with_region = RecommendationContext::new(
            Some(FarmingMode::Greenhouse),
            Some(Region::Region3),
            Season::CoolDry,
        );
        let without_region =
            RecommendationContext::new(Some(FarmingMode::Greenhouse), None, Season::CoolDry);

        assert_eq!(suitability_score(&crop, &with_region, &weights), 5);
        assert_eq!(suitability_score(&crop, &without_region, &weights), 3);
    }

    #[test]
    fn recommend_is_idempotent() {
        let catalog = CropCatalog::zimbabwe();
        let ctx = RecommendationContext::new(
            Some(FarmingMode::Greenhouse),
            Some(Region::Region1),
            Season::CoolDry,
        );
        let first = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
        let second = recommend(&ctx, &catalog, &ScoringWeights::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn huge_weights_saturate() {
        let catalog = CropCatalog::zimbabwe();
        let ctx = RecommendationContext::new(
            Some(FarmingMode::OpenField),
            Some(Region::Region2),
            Season::Rainy,
        );
        let weights = ScoringWeights {
            season: u32::MAX,
            region: 1,
            ..Default::default()
        };
        let ranked = recommend(&ctx, &catalog, &weights).unwrap();
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|r| r.score == u32::MAX));
        assert_eq!(names(&ranked)[0], "Maize");
    }
}
