//! Core data types for the factor engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Offset added to denominators and log arguments that may be exactly zero.
///
/// This is a zero-avoidance device for `ln(volume)` and `price / earnings`,
/// not a precision setting.
pub const ZERO_GUARD_EPSILON: f64 = 1e-6;

/// Convert a UTC datetime to milliseconds since epoch.
#[inline]
pub fn datetime_to_ms(dt: &DateTime<Utc>) -> TimestampMs {
    dt.timestamp_millis()
}

/// Time-ordered price/volume history of a single instrument.
///
/// All vectors are index-aligned and sorted by `ts_ms`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Observation timestamps.
    pub ts_ms: Vec<TimestampMs>,
    /// Close / last traded price.
    pub close: Vec<f64>,
    /// Traded volume.
    pub volume: Vec<f64>,
    /// Earnings per share, if the input carries it.
    pub earnings: Option<Vec<f64>>,
}

impl PriceSeries {
    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.ts_ms.len()
    }

    /// Whether the series holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ts_ms.is_empty()
    }
}

/// A named output factor.
///
/// The declaration order is the column order of a [`crate::FactorTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Price difference over the momentum period.
    Momentum,
    /// Percentage change over the momentum period.
    Roc,
    /// Simple moving average of price.
    Sma,
    /// Rolling volume-weighted average price.
    Vwap,
    /// Relative strength index.
    Rsi,
    /// MACD line (short EMA minus long EMA).
    Macd,
    /// EMA of the MACD line.
    MacdSignal,
    /// Log-volume on-balance volume.
    Obv,
    /// Price to earnings ratio.
    Pe,
    /// Regression slope (same value as `Slope`).
    LinearReg,
    /// Regression slope angle in degrees.
    LinearRegAngle,
    /// Regression intercept.
    Intercept,
    /// Regression slope.
    Slope,
    /// Rolling standard deviation times the multiplier.
    Stddev,
    /// Rolling mean (time series forecast).
    Tsf,
    /// Rolling variance times the multiplier.
    Var,
}

impl Factor {
    /// Every factor, in column order.
    pub const ALL: [Factor; 16] = [
        Factor::Momentum,
        Factor::Roc,
        Factor::Sma,
        Factor::Vwap,
        Factor::Rsi,
        Factor::Macd,
        Factor::MacdSignal,
        Factor::Obv,
        Factor::Pe,
        Factor::LinearReg,
        Factor::LinearRegAngle,
        Factor::Intercept,
        Factor::Slope,
        Factor::Stddev,
        Factor::Tsf,
        Factor::Var,
    ];

    /// Stable output column name.
    pub fn name(self) -> &'static str {
        match self {
            Factor::Momentum => "momentum",
            Factor::Roc => "roc",
            Factor::Sma => "sma",
            Factor::Vwap => "vwap",
            Factor::Rsi => "rsi",
            Factor::Macd => "macd",
            Factor::MacdSignal => "macd_signal",
            Factor::Obv => "obv",
            Factor::Pe => "pe",
            Factor::LinearReg => "linear_reg",
            Factor::LinearRegAngle => "linear_reg_angle",
            Factor::Intercept => "intercept",
            Factor::Slope => "slope",
            Factor::Stddev => "stddev",
            Factor::Tsf => "tsf",
            Factor::Var => "var",
        }
    }

    /// Look up a factor by its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Whether the factor needs an earnings column.
    pub fn requires_earnings(self) -> bool {
        matches!(self, Factor::Pe)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
