use super::region::Region;
use super::season::Season;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FarmingMode {
    Greenhouse,
    OpenField,
}

impl FarmingMode {
    /// Value stored in the settings store.
    pub fn as_str(&self) -> &'static str {
        match self {
            FarmingMode::Greenhouse => "greenhouse",
            FarmingMode::OpenField => "openField",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FarmingMode::Greenhouse => "Greenhouse",
            FarmingMode::OpenField => "Open Field",
        }
    }

    /// Exact match on the stored values; anything else is no mode.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "greenhouse" => Some(FarmingMode::Greenhouse),
            "openField" => Some(FarmingMode::OpenField),
            _ => None,
        }
    }
}

impl std::fmt::Display for FarmingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl WaterRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterRequirement::Low => "low",
            WaterRequirement::Medium => "medium",
            WaterRequirement::High => "high",
        }
    }
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A crop entry of the catalog. Every field is required when read from a
/// catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    pub name: String,
    pub regions: Vec<Region>,
    pub seasons: Vec<Season>,
    pub greenhouse_suitable: bool,
    pub open_field_suitable: bool,
    pub water_requirement: WaterRequirement,
    pub growth_duration_days: u32,
    pub description: String,
    pub tips: String,
}

impl CropDefinition {
    pub fn grows_in_season(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }

    pub fn grows_in_region(&self, region: Region) -> bool {
        self.regions.contains(&region)
    }

    /// Whether the crop can be grown under `mode`. No mode matches nothing.
    pub fn suits_mode(&self, mode: Option<FarmingMode>) -> bool {
        match mode {
            Some(FarmingMode::Greenhouse) => self.greenhouse_suitable,
            Some(FarmingMode::OpenField) => self.open_field_suitable,
            None => false,
        }
    }
}
