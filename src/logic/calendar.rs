use super::catalog::CropCatalog;
use crate::error::{AgroError, Result};
use crate::models::{CropDefinition, PlantingCalendar, Season};
use chrono::{Datelike, Month};

/// Planting calendar for `crop_name` as seen from `as_of`.
///
/// Fails with `NotFound` when the catalog has no crop of that exact name.
pub fn build_calendar(
    crop_name: &str,
    catalog: &CropCatalog,
    as_of: impl Datelike,
) -> Result<PlantingCalendar> {
    let crop = catalog
        .find(crop_name)
        .ok_or_else(|| AgroError::NotFound(format!("crop '{}'", crop_name)))?;

    let months = planting_months(crop);
    let next = next_planting_month(&months, as_of.month());

    Ok(PlantingCalendar {
        crop: crop.name.clone(),
        best_planting_months: months,
        next_planting_month: next,
        growth_duration_days: crop.growth_duration_days,
        tips: crop.tips.clone(),
        water_requirement: crop.water_requirement,
    })
}

/// Planting months of every season the crop grows in. Season blocks are
/// appended rainy, cool-dry, hot-dry; months are not re-sorted.
pub fn planting_months(crop: &CropDefinition) -> Vec<Month> {
    Season::ALL
        .iter()
        .filter(|season| crop.grows_in_season(**season))
        .flat_map(|season| season.planting_months().iter().copied())
        .collect()
}

/// First month in list order numbered at or after `current_month` (1-12),
/// wrapping to the head of the list when every month has passed.
pub fn next_planting_month(months: &[Month], current_month: u32) -> Option<Month> {
    months
        .iter()
        .copied()
        .find(|m| m.number_from_month() >= current_month)
        .or_else(|| months.first().copied())
}
