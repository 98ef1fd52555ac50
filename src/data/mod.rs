pub mod aggregates;
pub mod record;
pub mod source;
pub mod stats;

// Re-export key types for convenience
pub use record::{Gender, Metric, Record, TimeBucket};
pub use source::Dataset;
