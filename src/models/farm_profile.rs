use super::crop::FarmingMode;
use serde::{Deserialize, Serialize};

/// Harare, used when no coordinates have been stored.
pub const DEFAULT_LATITUDE: f64 = -17.8292;
pub const DEFAULT_LONGITUDE: f64 = 31.0522;

/// Onboarding answers kept in the settings store. Any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub farming_mode: Option<FarmingMode>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub setup_complete: bool,
}

impl FarmProfile {
    pub fn coordinates(&self) -> (f64, f64) {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => (DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
        }
    }
}
