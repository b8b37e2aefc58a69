//! Technical indicator library for the factor engine.
//!
//! Every function takes index-aligned slices for one instrument, sorted by
//! time, and returns output of the same length. Undefined values (warm-up,
//! missing input) are `f64::NAN`.
//!
//! This crate handles:
//! - Momentum and rate of change
//! - Simple and exponential moving averages, MACD
//! - RSI
//! - Log-volume on-balance volume
//! - Rolling VWAP
//! - Price to earnings
//! - Rolling least-squares regression factors

pub mod engine;
pub mod macd;
pub mod momentum;
pub mod moving_average;
pub mod obv;
pub mod regression;
pub mod rolling;
pub mod rsi;
pub mod valuation;
pub mod vwap;

pub use engine::{FactorColumns, FactorEngine};
pub use macd::{macd, Macd};
pub use momentum::{momentum, rate_of_change};
pub use moving_average::{ema, sma};
pub use obv::obv;
pub use regression::{regression_factors, RegressionFactors};
pub use rolling::RollingSum;
pub use rsi::rsi;
pub use valuation::price_to_earnings;
pub use vwap::vwap;
