use crate::error::{AgroError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Agro-ecological region (natural region I-V)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "REGION_1")]
    Region1,
    #[serde(rename = "REGION_2")]
    Region2,
    #[serde(rename = "REGION_3")]
    Region3,
    #[serde(rename = "REGION_4")]
    Region4,
    #[serde(rename = "REGION_5")]
    Region5,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Region1,
        Region::Region2,
        Region::Region3,
        Region::Region4,
        Region::Region5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Region1 => "REGION_1",
            Region::Region2 => "REGION_2",
            Region::Region3 => "REGION_3",
            Region::Region4 => "REGION_4",
            Region::Region5 => "REGION_5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Region1 => "Region I",
            Region::Region2 => "Region II",
            Region::Region3 => "Region III",
            Region::Region4 => "Region IV",
            Region::Region5 => "Region V",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().replace(['-', ' '], "_").as_str() {
            "REGION_1" | "REGION_I" | "1" | "I" => Some(Region::Region1),
            "REGION_2" | "REGION_II" | "2" | "II" => Some(Region::Region2),
            "REGION_3" | "REGION_III" | "3" | "III" => Some(Region::Region3),
            "REGION_4" | "REGION_IV" | "4" | "IV" => Some(Region::Region4),
            "REGION_5" | "REGION_V" | "5" | "V" => Some(Region::Region5),
            _ => None,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// District membership of each region.
///
/// A district belongs to at most one region. Lookups are exact and
/// case-sensitive; districts outside the table resolve to `None`.
#[derive(Debug, Clone)]
pub struct RegionTable {
    entries: Vec<(Region, Vec<String>)>,
    index: HashMap<String, Region>,
}

impl RegionTable {
    pub fn new(entries: Vec<(Region, Vec<String>)>) -> Result<Self> {
        let mut index = HashMap::new();
        for (region, districts) in &entries {
            for district in districts {
                if let Some(existing) = index.insert(district.clone(), *region) {
                    let message = if existing == *region {
                        format!(
                            "district '{}' is listed twice under {}",
                            district,
                            region.as_str()
                        )
                    } else {
                        format!(
                            "district '{}' is listed under both {} and {}",
                            district,
                            existing.as_str(),
                            region.as_str()
                        )
                    };
                    return Err(AgroError::Config(message));
                }
            }
        }
        Ok(Self { entries, index })
    }

    /// Built-in Zimbabwe table.
    pub fn zimbabwe() -> Self {
        let entries: Vec<(Region, Vec<String>)> = ZIMBABWE_REGIONS
            .iter()
            .map(|(region, districts)| (*region, districts.iter().map(|d| d.to_string()).collect()))
            .collect();
        let index = entries
            .iter()
            .flat_map(|(region, districts)| districts.iter().map(move |d| (d.clone(), *region)))
            .collect();
        Self { entries, index }
    }

    pub fn resolve(&self, district: &str) -> Option<Region> {
        self.index.get(district).copied()
    }

    pub fn districts(&self, region: Region) -> &[String] {
        self.entries
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, districts)| districts.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::zimbabwe()
    }
}

const ZIMBABWE_REGIONS: &[(Region, &[&str])] = &[
    (Region::Region1, &["Nyanga", "Mutare", "Chimanimani"]),
    (
        Region::Region2,
        &["Harare", "Marondera", "Bindura", "Chinhoyi", "Gweru"],
    ),
    (Region::Region3, &["Masvingo", "Chegutu", "Kadoma", "Kwekwe"]),
    (
        Region::Region4,
        &["Bulawayo", "Gwanda", "Beitbridge", "Chiredzi"],
    ),
    (Region::Region5, &["Binga", "Kariba", "Hwange"]),
];

/// Provinces and their districts, as offered during onboarding.
pub const PROVINCES: &[(&str, &[&str])] = &[
    ("Harare", &["Harare"]),
    ("Bulawayo", &["Bulawayo"]),
    (
        "Manicaland",
        &[
            "Mutare",
            "Chipinge",
            "Nyanga",
            "Buhera",
            "Chimanimani",
            "Makoni",
            "Mutasa",
        ],
    ),
    (
        "Mashonaland Central",
        &[
            "Bindura",
            "Centenary",
            "Guruve",
            "Mazowe",
            "Mount Darwin",
            "Rushinga",
            "Shamva",
        ],
    ),
    (
        "Mashonaland East",
        &[
            "Marondera",
            "Chikomba",
            "Goromonzi",
            "Hwedza",
            "Mudzi",
            "Murehwa",
            "Mutoko",
            "Seke",
            "UMP",
        ],
    ),
    (
        "Mashonaland West",
        &[
            "Chinhoyi",
            "Chegutu",
            "Hurungwe",
            "Kadoma",
            "Kariba",
            "Makonde",
            "Mhondoro-Ngezi",
            "Sanyati",
            "Zvimba",
        ],
    ),
    (
        "Masvingo",
        &[
            "Masvingo", "Bikita", "Chiredzi", "Chivi", "Gutu", "Mwenezi", "Zaka",
        ],
    ),
    (
        "Matabeleland North",
        &[
            "Lupane",
            "Binga",
            "Bubi",
            "Hwange",
            "Nkayi",
            "Tsholotsho",
            "Umguza",
        ],
    ),
    (
        "Matabeleland South",
        &[
            "Gwanda",
            "Beitbridge",
            "Bulilima",
            "Insiza",
            "Mangwe",
            "Matobo",
            "Umzingwane",
        ],
    ),
    (
        "Midlands",
        &[
            "Gweru",
            "Chirumhanzu",
            "Gokwe North",
            "Gokwe South",
            "Kwekwe",
            "Mberengwa",
            "Shurugwi",
            "Zvishavane",
        ],
    ),
];

pub fn districts_for_province(province: &str) -> Option<&'static [&'static str]> {
    PROVINCES
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, districts)| *districts)
}
