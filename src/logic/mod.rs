pub mod advisor;
pub mod calendar;
pub mod catalog;
pub mod data_sync;
pub mod recommend;
pub mod rules;

pub use advisor::Advisor;
pub use calendar::build_calendar;
pub use catalog::CropCatalog;
pub use data_sync::WeatherSyncService;
pub use recommend::recommend;
pub use rules::{AdvisoryEngine, AdvisoryThresholds};
