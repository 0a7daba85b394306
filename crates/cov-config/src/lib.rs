pub mod catalogs;
pub mod covgen;
pub mod generation;
pub mod logging;
pub mod reports;
pub mod sink;
pub mod traffic;
pub mod types;
mod validate;

pub use catalogs::Catalogs;
pub use covgen::CovgenConfig;
pub use generation::{FilesConfig, GenerationConfig, UserAdminConfig, UsersConfig, Volume};
pub use logging::{LogFormat, LoggingConfig};
pub use reports::{ReportTypeEntry, ReportTypesConfig, WeightNormalization};
pub use sink::SinkConfig;
pub use traffic::TrafficConfig;
pub use types::{ClockTime, HumanDuration};
