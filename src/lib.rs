//! Crop recommendations, planting calendars and weather advisories for
//! Zimbabwean smallholder farms.

pub mod config;
pub mod datasources;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;

pub use config::Config;
pub use db::Database;
pub use error::{AgroError, Result};
pub use logic::{Advisor, CropCatalog, WeatherSyncService};
