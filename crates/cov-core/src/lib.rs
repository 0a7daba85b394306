//! Weighted sampling and traffic shaping primitives.
//!
//! Every operation that consumes randomness takes the random source as an
//! explicit `&mut R` so callers control seeding and sharing.

pub mod catalog;
pub mod coverage;
pub mod error;
pub mod sampler;
pub mod softmax;
pub mod traffic;

pub use catalog::{WEIGHT_SUM_TOLERANCE, WeightedCatalog};
pub use coverage::CoverageInfo;
pub use error::{SampleError, SampleResult};
pub use sampler::{
    pick_categorical, pick_one, pick_one_uniform, pick_up_to_unique, pick_up_to_unique_from_list,
};
pub use softmax::softmax;
pub use traffic::{BusinessHours, DayPlan, TrafficCoefficients, TrafficModel};
