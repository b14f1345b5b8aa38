use crate::error::{AgroError, Result};
use crate::models::{CropDefinition, Region, Season, WaterRequirement};
use std::collections::HashSet;
use std::path::Path;

/// Immutable crop reference data, validated on construction
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
}

impl CropCatalog {
    pub fn new(crops: Vec<CropDefinition>) -> Result<Self> {
        validate(&crops)?;
        Ok(Self { crops })
    }

    /// Built-in catalog of crops grown across Zimbabwe's natural regions.
    pub fn zimbabwe() -> Self {
        Self {
            crops: builtin_crops(),
        }
    }

    /// Parse a YAML list of crop definitions.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let crops: Vec<CropDefinition> = serde_yaml::from_str(content)
            .map_err(|e| AgroError::Config(format!("Failed to parse crop catalog: {}", e)))?;
        Self::new(crops)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgroError::Config(format!("Failed to read crop catalog {:?}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    /// Case-sensitive lookup by crop name.
    pub fn find(&self, name: &str) -> Option<&CropDefinition> {
        self.crops.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        validate(&self.crops)
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::zimbabwe()
    }
}

fn validate(crops: &[CropDefinition]) -> Result<()> {
    if crops.is_empty() {
        return Err(AgroError::Config("crop catalog is empty".into()));
    }

    let mut names = HashSet::new();
    for crop in crops {
        if crop.name.trim().is_empty() {
            return Err(AgroError::Config("crop catalog entry has no name".into()));
        }
        if crop.growth_duration_days == 0 {
            return Err(AgroError::Config(format!(
                "crop '{}' has a zero growth duration",
                crop.name
            )));
        }
        if !names.insert(crop.name.as_str()) {
            return Err(AgroError::Config(format!(
                "crop '{}' appears more than once",
                crop.name
            )));
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn crop(
    name: &str,
    regions: &[Region],
    seasons: &[Season],
    greenhouse_suitable: bool,
    open_field_suitable: bool,
    water_requirement: WaterRequirement,
    growth_duration_days: u32,
    description: &str,
    tips: &str,
) -> CropDefinition {
    CropDefinition {
        name: name.to_string(),
        regions: regions.to_vec(),
        seasons: seasons.to_vec(),
        greenhouse_suitable,
        open_field_suitable,
        water_requirement,
        growth_duration_days,
        description: description.to_string(),
        tips: tips.to_string(),
    }
}

fn builtin_crops() -> Vec<CropDefinition> {
    use Region::*;
    use Season::*;
    use WaterRequirement::*;

    vec![
        crop(
            "Maize",
            &[Region1, Region2, Region3],
            &[Rainy],
            true,
            true,
            Medium,
            120,
            "Staple crop in Zimbabwe, requires good rainfall or irrigation.",
            "Plant when soil is moist. Space plants 25-30cm apart with 75-90cm between rows.",
        ),
        crop(
            "Tomatoes",
            &[Region1, Region2, Region3, Region4],
            &[Rainy, CoolDry, HotDry],
            true,
            true,
            High,
            90,
            "High-value crop that grows well in most regions with proper care.",
            "In greenhouses, can be grown year-round. In open fields, best during cooler months.",
        ),
        crop(
            "Wheat",
            &[Region1, Region2],
            &[CoolDry],
            false,
            true,
            Medium,
            120,
            "Winter crop grown after the rainy season.",
            "Plant from April to May. Requires irrigation in most areas.",
        ),
        crop(
            "Groundnuts",
            &[Region2, Region3, Region4],
            &[Rainy],
            false,
            true,
            Medium,
            130,
            "Important legume crop that improves soil fertility.",
            "Plant at the onset of rains. Avoid waterlogged soils.",
        ),
        crop(
            "Sweet Potatoes",
            &[Region1, Region2, Region3, Region4],
            &[Rainy, CoolDry],
            false,
            true,
            Low,
            150,
            "Drought-tolerant crop with good nutritional value.",
            "Can be planted throughout the year with irrigation. Drought resistant.",
        ),
        crop(
            "Cabbage",
            &[Region1, Region2, Region3],
            &[CoolDry, HotDry],
            true,
            true,
            High,
            90,
            "Popular vegetable that grows well in cooler weather.",
            "Best grown in the cool season. Requires regular watering and pest management.",
        ),
        crop(
            "Onions",
            &[Region1, Region2, Region3],
            &[CoolDry],
            true,
            true,
            Medium,
            150,
            "High-value crop that stores well.",
            "Plant in April-May. Harvest when tops fall over and begin to dry.",
        ),
        crop(
            "Sorghum",
            &[Region3, Region4, Region5],
            &[Rainy],
            false,
            true,
            Low,
            120,
            "Drought-tolerant grain crop suitable for drier regions.",
            "More drought-tolerant than maize. Good for food security in dry areas.",
        ),
        crop(
            "Beans",
            &[Region1, Region2, Region3],
            &[Rainy, CoolDry],
            true,
            true,
            Medium,
            90,
            "Important source of protein and soil improvement.",
            "Can be intercropped with maize. Fixes nitrogen in the soil.",
        ),
        crop(
            "Peppers",
            &[Region1, Region2, Region3],
            &[Rainy, CoolDry, HotDry],
            true,
            true,
            Medium,
            90,
            "High-value crop that grows well in greenhouses.",
            "Greenhouse production allows year-round growing. Good crop rotation with tomatoes.",
        ),
    ]
}
