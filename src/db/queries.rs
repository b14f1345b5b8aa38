use crate::db::Database;
use crate::error::{AgroError, Result};
use crate::models::{FarmProfile, FarmingMode, WeatherSnapshot};
use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::warn;

pub const KEY_FARMING_TYPE: &str = "farmingType";
pub const KEY_PROVINCE: &str = "province";
pub const KEY_DISTRICT: &str = "district";
pub const KEY_LATITUDE: &str = "userLatitude";
pub const KEY_LONGITUDE: &str = "userLongitude";
pub const KEY_SETUP_COMPLETE: &str = "setupComplete";

// Settings Queries

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
            Ok(())
        })
    }
}

// Farm Profile Queries

impl Database {
    /// Read the onboarding answers. Unparseable values are logged and left unset.
    pub fn load_farm_profile(&self) -> Result<FarmProfile> {
        let farming_mode = self.get_setting(KEY_FARMING_TYPE)?.and_then(|value| {
            FarmingMode::from_str(&value).or_else(|| {
                warn!(farming_type = %value, "Unknown farmingType in settings, ignoring");
                None
            })
        });

        Ok(FarmProfile {
            farming_mode,
            province: self.get_setting(KEY_PROVINCE)?,
            district: self.get_setting(KEY_DISTRICT)?,
            latitude: self.get_coordinate(KEY_LATITUDE)?,
            longitude: self.get_coordinate(KEY_LONGITUDE)?,
            setup_complete: self.get_setting(KEY_SETUP_COMPLETE)?.as_deref() == Some("true"),
        })
    }

    /// Write every set field of the profile. Unset fields keep their stored value.
    pub fn save_farm_profile(&self, profile: &FarmProfile) -> Result<()> {
        if let Some(mode) = profile.farming_mode {
            self.set_setting(KEY_FARMING_TYPE, mode.as_str())?;
        }
        if let Some(province) = &profile.province {
            self.set_setting(KEY_PROVINCE, province)?;
        }
        if let Some(district) = &profile.district {
            self.set_setting(KEY_DISTRICT, district)?;
        }
        if let Some(lat) = profile.latitude {
            self.set_setting(KEY_LATITUDE, &lat.to_string())?;
        }
        if let Some(lon) = profile.longitude {
            self.set_setting(KEY_LONGITUDE, &lon.to_string())?;
        }
        self.set_setting(
            KEY_SETUP_COMPLETE,
            if profile.setup_complete { "true" } else { "false" },
        )
    }

    fn get_coordinate(&self, key: &str) -> Result<Option<f64>> {
        Ok(self.get_setting(key)?.and_then(|value| {
            value.parse::<f64>().ok().or_else(|| {
                warn!(key, value = %value, "Invalid coordinate in settings, ignoring");
                None
            })
        }))
    }
}

// Weather Cache Queries

/// Snapshot read back from the weather cache
#[derive(Debug, Clone, PartialEq)]
pub struct CachedWeather {
    pub snapshot: WeatherSnapshot,
    pub fetched_at: DateTime<Utc>,
}

impl Database {
    pub fn get_cached_weather(&self, cache_key: &str) -> Result<Option<CachedWeather>> {
        let row: Option<(String, String)> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT payload, fetched_at FROM weather_cache WHERE cache_key = ?1",
                [cache_key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(Into::into)
        })?;

        let Some((payload, fetched_at)) = row else {
            return Ok(None);
        };

        let snapshot: WeatherSnapshot = serde_json::from_str(&payload)?;
        let fetched_at = DateTime::parse_from_rfc3339(&fetched_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AgroError::InvalidData(format!("Bad cache timestamp: {}", e)))?;

        Ok(Some(CachedWeather {
            snapshot,
            fetched_at,
        }))
    }

    pub fn cache_weather(
        &self,
        cache_key: &str,
        snapshot: &WeatherSnapshot,
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO weather_cache (cache_key, payload, fetched_at)
                VALUES (?1, ?2, ?3)
                "#,
                params![cache_key, payload, fetched_at.to_rfc3339()],
            )?;
            Ok(())
        })
    }
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailyForecast};

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temp_c: 27.5,
                humidity_percent: 48.0,
                wind_speed_mps: 3.2,
                condition_code: 802,
            },
            daily: vec![DailyForecast {
                precipitation_prob: 0.35,
                temp_max_c: 29.0,
                temp_min_c: 15.0,
                condition_code: 500,
            }],
            alerts: Vec::new(),
        }
    }

    #[test]
    fn settings_overwrite() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_setting("district").unwrap(), None);

        db.set_setting("district", "Gweru").unwrap();
        db.set_setting("district", "Binga").unwrap();
        assert_eq!(db.get_setting("district").unwrap().as_deref(), Some("Binga"));
    }

    #[test]
    fn empty_store_gives_default_profile() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load_farm_profile().unwrap(), FarmProfile::default());
    }

    #[test]
    fn farm_profile_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let profile = FarmProfile {
            farming_mode: Some(FarmingMode::OpenField),
            province: Some("Matabeleland North".into()),
            district: Some("Binga".into()),
            latitude: Some(-17.62),
            longitude: Some(27.34),
            setup_complete: true,
        };
        db.save_farm_profile(&profile).unwrap();

        assert_eq!(
            db.get_setting(KEY_FARMING_TYPE).unwrap().as_deref(),
            Some("openField")
        );
        assert_eq!(db.load_farm_profile().unwrap(), profile);
    }

    #[test]
    fn unknown_farming_type_is_ignored() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(KEY_FARMING_TYPE, "hydroponic").unwrap();
        db.set_setting(KEY_LATITUDE, "not-a-number").unwrap();
        db.set_setting(KEY_DISTRICT, "Harare").unwrap();

        let profile = db.load_farm_profile().unwrap();
        assert_eq!(profile.farming_mode, None);
        assert_eq!(profile.latitude, None);
        assert_eq!(profile.district.as_deref(), Some("Harare"));
        assert!(!profile.setup_complete);
    }

    #[test]
    fn farming_type_must_match_stored_spelling() {
        let db = Database::open_in_memory().unwrap();
        for value in ["Greenhouse", "OPENFIELD", "open_field", "Open Field"] {
            db.set_setting(KEY_FARMING_TYPE, value).unwrap();
            assert_eq!(db.load_farm_profile().unwrap().farming_mode, None, "{}", value);
        }
    }

    #[test]
    fn weather_cache_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let fetched_at = DateTime::from_timestamp(1_760_000_000, 0).unwrap();

        assert!(db.get_cached_weather("weather_-17.83_31.05").unwrap().is_none());

        db.cache_weather("weather_-17.83_31.05", &snapshot(), fetched_at)
            .unwrap();
        let cached = db.get_cached_weather("weather_-17.83_31.05").unwrap().unwrap();
        assert_eq!(cached.snapshot, snapshot());
        assert_eq!(cached.fetched_at, fetched_at);
        assert!(db.get_cached_weather("weather_-20.00_28.50").unwrap().is_none());
    }

    #[test]
    fn corrupt_cache_payload_is_an_error() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO weather_cache (cache_key, payload, fetched_at) VALUES ('k', '{', '2025-01-01T00:00:00Z')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        assert!(matches!(db.get_cached_weather("k"), Err(AgroError::Json(_))));
    }
}
