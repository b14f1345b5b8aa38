pub mod crop;
pub mod farm_profile;
pub mod forecast;
pub mod recommendation;
pub mod region;
pub mod season;

pub use crop::*;
pub use farm_profile::*;
pub use forecast::*;
pub use recommendation::*;
pub use region::*;
pub use season::*;
