#[macro_use]
mod log_macros;

pub mod datagen;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sink;
pub mod tracing_init;
