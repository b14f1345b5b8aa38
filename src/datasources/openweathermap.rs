use crate::config::OpenWeatherMapConfig;
use crate::error::{AgroError, Result};
use crate::models::forecast::{CurrentConditions, DailyForecast, WeatherAlert, WeatherSnapshot};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/3.0";

/// Condition code reported when the provider omits the weather array (clear sky)
const CLEAR_SKY: u32 = 800;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap One Call response structures
#[derive(Debug, Deserialize)]
struct OwmOneCallResponse {
    current: OwmCurrent,
    #[serde(default)]
    daily: Vec<OwmDaily>,
    #[serde(default)]
    alerts: Vec<OwmAlert>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    temp: f64,
    humidity: f64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmDaily {
    #[serde(default)]
    pop: f64, // probability of precipitation
    temp: OwmDailyTemp,
    #[serde(default)]
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmDailyTemp {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct OwmAlert {
    #[serde(default)]
    sender_name: Option<String>,
    event: String,
    start: i64,
    end: i64,
    #[serde(default)]
    description: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &OpenWeatherMapConfig {
        &self.config
    }

    fn onecall_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/onecall?lat={}&lon={}&units=metric&exclude=minutely,hourly&appid={}",
            API_BASE_URL, latitude, longitude, self.config.api_key
        )
    }

    /// Fetch current conditions, daily forecast and provider alerts
    pub async fn fetch_snapshot(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        tracing::debug!(latitude, longitude, "Fetching OpenWeatherMap One Call");

        let response = self
            .client
            .get(self.onecall_url(latitude, longitude))
            .send()
            .await
            .map_err(|e| AgroError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgroError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(|e| {
            AgroError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
        })?;

        parse_onecall(&body)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let response = self
            .client
            .get(self.onecall_url(latitude, longitude))
            .send()
            .await
            .map_err(|e| AgroError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }
}

/// Parse a One Call response body into a snapshot
pub fn parse_onecall(body: &str) -> Result<WeatherSnapshot> {
    let response: OwmOneCallResponse = serde_json::from_str(body).map_err(|e| {
        AgroError::DataSourceUnavailable(format!(
            "Failed to parse OpenWeatherMap response: {}",
            e
        ))
    })?;
    Ok(convert_response(response))
}

fn condition_code(weather: &[OwmWeather]) -> u32 {
    weather.first().map(|w| w.id).unwrap_or(CLEAR_SKY)
}

fn convert_response(response: OwmOneCallResponse) -> WeatherSnapshot {
    let current = CurrentConditions {
        temp_c: response.current.temp,
        humidity_percent: response.current.humidity,
        wind_speed_mps: response.current.wind_speed,
        condition_code: condition_code(&response.current.weather),
    };

    let daily = response
        .daily
        .into_iter()
        .map(|day| DailyForecast {
            precipitation_prob: day.pop,
            temp_max_c: day.temp.max,
            temp_min_c: day.temp.min,
            condition_code: condition_code(&day.weather),
        })
        .collect();

    let alerts = response
        .alerts
        .into_iter()
        .map(|alert| WeatherAlert {
            event: alert.event,
            description: alert.description,
            start: alert.start,
            end: alert.end,
            sender_name: alert.sender_name,
        })
        .collect();

    WeatherSnapshot {
        current,
        daily,
        alerts,
    }
}
