#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod clean;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod ingest;
pub mod intent;
pub mod lookups;
pub mod map;
pub mod metrics;
pub mod pipeline;
pub mod schema;
pub mod unify;

// Re-export core types
pub use error::{Result, WorkforceError};
pub use lookups::Lookups;
pub use pipeline::{PipelineConfig, PipelineReport};
pub use schema::{Area, EmploymentState, WorkerType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
