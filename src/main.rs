mod cli;
mod onboarding;
mod report;

use agrocast::config::Config;
use agrocast::db::Database;
use agrocast::logic::{Advisor, WeatherSyncService};
use agrocast::models::{
    resolve_season, FarmProfile, FarmingMode, WeatherSnapshot, DEFAULT_LATITUDE,
    DEFAULT_LONGITUDE,
};
use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use cli::{Cli, Commands, RecommendArgs};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load_or_default(cli.config.clone()).context("Configuration error")?;

    // Initialize database
    let db_path = Config::db_path(cli.data_dir.as_ref())?;
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Recommend(RecommendArgs::default()));

    let profile = db.load_farm_profile()?;
    let advisor = config.advisor().context("Failed to load crop catalog")?;

    match command {
        Commands::Init => {
            onboarding::run(&db, &config, cli.config.as_deref())?;
        }
        Commands::Season { date } => {
            println!("{}", report::season(resolve_season(reference_date(date))));
        }
        Commands::Region { district } => match advisor.resolve_region(&district) {
            Some(region) => println!("{}: {}", district, region.label()),
            None => println!(
                "{}: unknown district, recommendations are not filtered by region",
                district
            ),
        },
        Commands::Recommend(args) => recommend(&advisor, &config, &profile, args)?,
        Commands::Calendar { crop, date, json } => {
            let calendar = advisor.build_calendar(&crop, reference_date(date))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&calendar)?);
            } else {
                println!("{}", report::calendar(&calendar));
            }
        }
        Commands::Alerts {
            mode,
            snapshot,
            json,
        } => {
            let farming_mode = resolve_mode(mode, &profile, &config);
            let snapshot = match snapshot {
                Some(path) => read_snapshot(&path)?,
                None => {
                    let (latitude, longitude) = coordinates(&profile, &config);
                    WeatherSyncService::new(&config, db.clone())
                        .snapshot(latitude, longitude)
                        .await
                        .context("Failed to get weather")?
                }
            };

            let alerts = advisor.derive_alerts(&snapshot, farming_mode, Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            } else {
                println!("{}\n", report::weather(&snapshot));
                println!("{}", report::alerts(&alerts));
            }
        }
        Commands::Crops => println!("{}", report::crops(advisor.catalog())),
        Commands::Check => check(&advisor, &config, &profile, &db).await?,
    }

    Ok(())
}

fn reference_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Flag first, then the settings store, then the config file.
fn resolve_mode(
    flag: Option<FarmingMode>,
    profile: &FarmProfile,
    config: &Config,
) -> Option<FarmingMode> {
    flag.or(profile.farming_mode).or_else(|| config.farm.farming_mode())
}

/// Stored coordinates, then the weather config, then Harare.
fn coordinates(profile: &FarmProfile, config: &Config) -> (f64, f64) {
    if let (Some(lat), Some(lon)) = (profile.latitude, profile.longitude) {
        return (lat, lon);
    }
    config
        .openweathermap
        .as_ref()
        .and_then(|owm| Some((owm.latitude?, owm.longitude?)))
        .unwrap_or((DEFAULT_LATITUDE, DEFAULT_LONGITUDE))
}

fn read_snapshot(path: &Path) -> anyhow::Result<WeatherSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid weather snapshot in {}", path.display()))
}

fn recommend(
    advisor: &Advisor,
    config: &Config,
    profile: &FarmProfile,
    args: RecommendArgs,
) -> anyhow::Result<()> {
    let farming_mode = resolve_mode(args.mode, profile, config);
    let district = args
        .district
        .or_else(|| profile.district.clone())
        .or_else(|| config.farm.district.clone());
    let as_of = reference_date(args.date);

    if let Some(d) = district.as_deref() {
        if advisor.resolve_region(d).is_none() {
            tracing::warn!(district = %d, "Unknown district, not filtering by region");
        }
    }

    let context = advisor.context(farming_mode, district.as_deref(), as_of);
    let ranked = advisor.recommend(farming_mode, district.as_deref(), as_of)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        println!("{}", report::recommendations(&context, &ranked));
    }
    Ok(())
}

async fn check(
    advisor: &Advisor,
    config: &Config,
    profile: &FarmProfile,
    db: &Database,
) -> anyhow::Result<()> {
    println!("Config:    OK");

    advisor.catalog().validate()?;
    println!("Catalog:   OK ({} crops)", advisor.catalog().len());

    println!("Database:  OK ({})", db.path().display());

    let rules: Vec<_> = advisor
        .advisory()
        .list_rules()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    println!("Rules:     {}", rules.join(", "));

    if profile.setup_complete {
        println!(
            "Farm:      {} / {}",
            resolve_mode(None, profile, config)
                .map(|m| m.label())
                .unwrap_or("no farming type"),
            profile.district.as_deref().unwrap_or("no district")
        );
    } else {
        println!("Farm:      not set up, run `agrocast init`");
    }

    let (latitude, longitude) = coordinates(profile, config);
    let weather = WeatherSyncService::new(config, db.clone());
    match weather.check_connection(latitude, longitude).await {
        Some(true) => println!("Weather:   OK"),
        Some(false) => println!("Weather:   OFFLINE"),
        None => println!("Weather:   not configured"),
    }

    Ok(())
}
