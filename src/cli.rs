use agrocast::models::FarmingMode;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agrocast",
    version,
    about = "Crop recommendations, planting calendars and weather alerts for Zimbabwean farms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive farm setup
    Init,
    /// Show the season for a date
    Season {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Look up the agro-ecological region of a district
    Region {
        district: String,
    },
    /// Rank crops suitable for planting now (default command)
    Recommend(RecommendArgs),
    /// Planting calendar for a crop
    Calendar {
        crop: String,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Weather alerts for the farm location
    Alerts {
        /// Farming mode (greenhouse or open-field)
        #[arg(short, long, value_parser = parse_farming_mode)]
        mode: Option<FarmingMode>,
        /// Read the weather snapshot from a JSON file instead of fetching it
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List the crop catalog
    Crops,
    /// Validate config and catalog, test the weather connection
    Check,
}

#[derive(Args, Default)]
pub struct RecommendArgs {
    /// Farming mode (greenhouse or open-field)
    #[arg(short, long, value_parser = parse_farming_mode)]
    pub mode: Option<FarmingMode>,
    /// District used to resolve the natural region
    #[arg(long)]
    pub district: Option<String>,
    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub json: bool,
}

/// Lenient `--mode` parsing: case, spaces, `-` and `_` are ignored.
fn parse_farming_mode(s: &str) -> Result<FarmingMode, String> {
    match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
        "greenhouse" => Ok(FarmingMode::Greenhouse),
        "openfield" => Ok(FarmingMode::OpenField),
        _ => Err(format!(
            "unknown farming mode '{}', expected greenhouse or open-field",
            s
        )),
    }
}
