pub mod documents;
pub mod factory;
pub mod files;
pub mod record;
pub mod reports;
pub mod users;
#[cfg(test)]
mod tests;

pub use documents::{DocumentUpdate, DocumentUpdateFactory};
pub use factory::{RecordFactory, RecordFactoryOptions};
pub use files::{ReportFile, load_file_pool, read_file_pool};
pub use record::{AccessRecord, Actor, Channel, ReportType};
pub use reports::report_coverage;
pub use users::{Population, User, generate_users};
