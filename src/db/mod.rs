pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::Database;
pub use queries::CachedWeather;
