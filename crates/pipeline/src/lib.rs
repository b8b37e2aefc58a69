//! Multi-instrument factor pipeline.
//!
//! This crate handles:
//! - Input column resolution and validation
//! - Partitioning rows by instrument with a stable per-instrument time sort
//! - Running the indicator engine per partition, optionally in parallel
//! - Concatenating tagged rows into one factor table

pub mod partition;
pub mod pipeline;
pub mod schema;

pub use partition::{partition_by_instrument, InstrumentPartition};
pub use pipeline::FactorPipeline;
pub use schema::ResolvedInput;
