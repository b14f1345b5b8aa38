use agrocast::config::{Config, OpenWeatherMapConfig};
use agrocast::db::Database;
use agrocast::error::{AgroError, Result};
use agrocast::models::{
    districts_for_province, FarmProfile, FarmingMode, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
    PROVINCES,
};
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};

fn input_error(e: dialoguer::Error) -> AgroError {
    AgroError::Config(format!("Input error: {}", e))
}

/// Ask for farming mode and location, store the answers in the settings
/// store and, when a weather API key is given, write it to the config file.
/// Returns the path of the config file when one was written.
pub fn run(
    db: &Database,
    config: &Config,
    config_override: Option<&Path>,
) -> Result<Option<PathBuf>> {
    println!();
    println!("Let's set up agrocast for your farm.");
    println!();

    // --- Farm ---
    let modes = [FarmingMode::Greenhouse, FarmingMode::OpenField];
    let labels: Vec<_> = modes.iter().map(|m| m.label()).collect();
    let mode_index = Select::new()
        .with_prompt("Farming type")
        .items(&labels)
        .default(1)
        .interact()
        .map_err(input_error)?;

    let provinces: Vec<_> = PROVINCES.iter().map(|(name, _)| *name).collect();
    let province_index = Select::new()
        .with_prompt("Province")
        .items(&provinces)
        .default(0)
        .interact()
        .map_err(input_error)?;
    let province = provinces[province_index];

    let districts = districts_for_province(province)
        .ok_or_else(|| AgroError::NotFound(format!("province '{}'", province)))?;
    let district_index = Select::new()
        .with_prompt("District")
        .items(districts)
        .default(0)
        .interact()
        .map_err(input_error)?;

    println!();

    // --- Location ---
    println!("Farm location (used for weather)");
    let latitude: f64 = Input::new()
        .with_prompt("  Latitude")
        .default(DEFAULT_LATITUDE)
        .interact_text()
        .map_err(input_error)?;

    let longitude: f64 = Input::new()
        .with_prompt("  Longitude")
        .default(DEFAULT_LONGITUDE)
        .interact_text()
        .map_err(input_error)?;

    let profile = FarmProfile {
        farming_mode: Some(modes[mode_index]),
        province: Some(province.to_string()),
        district: Some(districts[district_index].to_string()),
        latitude: Some(latitude),
        longitude: Some(longitude),
        setup_complete: true,
    };
    db.save_farm_profile(&profile)?;
    tracing::info!(province, district = districts[district_index], "Farm profile saved");

    println!();

    // --- OpenWeatherMap (optional) ---
    println!("OpenWeatherMap (leave API key blank to skip)");
    let owm_api_key: String = Input::new()
        .with_prompt("  API key")
        .default(String::new())
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;

    if owm_api_key.is_empty() {
        println!();
        println!("Farm profile saved.");
        return Ok(None);
    }

    let mut config = config.clone();
    config.openweathermap = Some(OpenWeatherMapConfig {
        api_key: owm_api_key,
        latitude: Some(latitude),
        longitude: Some(longitude),
        enabled: true,
        cache_ttl_secs: config
            .openweathermap
            .as_ref()
            .map(|c| c.cache_ttl_secs)
            .unwrap_or(3600),
    });

    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };
    config.save(&config_path)?;

    println!();
    println!("Farm profile saved.");
    println!("Configuration saved to {}", config_path.display());

    Ok(Some(config_path))
}
