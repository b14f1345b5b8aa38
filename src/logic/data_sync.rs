use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::db::Database;
use crate::error::{AgroError, Result};
use crate::models::WeatherSnapshot;
use chrono::{DateTime, Duration, Utc};

const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Weather snapshots from OpenWeatherMap, served from the SQLite cache while fresh.
pub struct WeatherSyncService {
    db: Database,
    client: Option<OpenWeatherMapClient>,
    cache_ttl: Duration,
}

impl WeatherSyncService {
    pub fn new(config: &Config, db: Database) -> Self {
        // Only create the client if a key is configured and enabled
        let client = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured for weather data");
                OpenWeatherMapClient::new(c.clone())
            });

        if client.is_none() {
            tracing::info!("OpenWeatherMap not configured - only cached weather is available");
        }

        let ttl_secs = config
            .openweathermap
            .as_ref()
            .map(|c| c.cache_ttl_secs)
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        Self {
            db,
            client,
            cache_ttl: Duration::seconds(ttl_secs.min(i64::MAX as u64) as i64),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub async fn snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        self.snapshot_at(latitude, longitude, Utc::now()).await
    }

    /// Cached snapshot if younger than the TTL at `now`, otherwise a fresh fetch
    /// which replaces the cache entry.
    pub async fn snapshot_at(
        &self,
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> Result<WeatherSnapshot> {
        let key = cache_key(latitude, longitude);

        let cached = match self.db.get_cached_weather(&key) {
            Ok(cached) => cached,
            Err(e @ (AgroError::Json(_) | AgroError::InvalidData(_))) => {
                tracing::warn!(cache_key = %key, "Ignoring unreadable cache entry: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(cached) = cached {
            if is_fresh(cached.fetched_at, now, self.cache_ttl) {
                tracing::debug!(cache_key = %key, "Using cached weather");
                return Ok(cached.snapshot);
            }
            tracing::debug!(cache_key = %key, "Cached weather is stale");
        }

        let client = self.client.as_ref().ok_or_else(|| {
            AgroError::DataSourceUnavailable(
                "OpenWeatherMap is not configured and no fresh cached weather exists".into(),
            )
        })?;

        let snapshot = client.fetch_snapshot(latitude, longitude).await?;
        self.db.cache_weather(&key, &snapshot, now)?;
        tracing::info!(cache_key = %key, "Weather snapshot updated");

        Ok(snapshot)
    }

    /// `None` when no client is configured.
    pub async fn check_connection(&self, latitude: f64, longitude: f64) -> Option<bool> {
        let client = self.client.as_ref()?;
        Some(
            client
                .test_connection(latitude, longitude)
                .await
                .unwrap_or(false),
        )
    }
}

/// Cache key for a location, rounded to two decimal places
pub fn cache_key(latitude: f64, longitude: f64) -> String {
    format!("weather_{:.2}_{:.2}", latitude, longitude)
}

/// Fetched no later than `now` and less than `ttl` ago.
pub fn is_fresh(fetched_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    fetched_at <= now && now - fetched_at < ttl
}
