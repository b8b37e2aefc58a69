//! Core types and configuration for the factor engine.
//!
//! This crate provides shared types used across all other crates:
//! - Input tables and per-instrument price series
//! - Factor names and the output factor table
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod output;
pub mod table;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use output::{FactorRow, FactorTable};
pub use table::{Column, ColumnData, InputTable};
pub use types::*;
