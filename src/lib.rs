pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod report;

pub use config::SamplingConfig;
pub use error::{Result, SamplingError};
pub use geometry::{Centerline, LinearReference};
pub use pipeline::{Coverage, SamplingPlan, SamplingReport};
