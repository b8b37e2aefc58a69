//! Configuration structures for the factor engine.

use crate::error::{Error, Result};
use crate::types::ZERO_GUARD_EPSILON;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the factor pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input column names.
    pub columns: ColumnConfig,
    /// Momentum / rate-of-change configuration.
    pub momentum: MomentumConfig,
    /// Simple moving average configuration.
    pub sma: SmaConfig,
    /// Rolling VWAP configuration.
    pub vwap: VwapConfig,
    /// RSI configuration.
    pub rsi: RsiConfig,
    /// MACD configuration.
    pub macd: MacdConfig,
    /// Rolling regression configuration.
    pub regression: RegressionConfig,
    /// Zero guard added to log-volume and earnings denominators.
    pub epsilon: f64,
    /// What to do with instruments shorter than the warm-up.
    pub warmup: WarmupPolicy,
    /// Order of instrument groups in the output.
    pub instrument_order: InstrumentOrder,
    /// Compute instruments on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            momentum: MomentumConfig::default(),
            sma: SmaConfig::default(),
            vwap: VwapConfig::default(),
            rsi: RsiConfig::default(),
            macd: MacdConfig::default(),
            regression: RegressionConfig::default(),
            epsilon: ZERO_GUARD_EPSILON,
            warmup: WarmupPolicy::default(),
            instrument_order: InstrumentOrder::default(),
            parallel: false,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        check_period("momentum.period", self.momentum.period)?;
        check_period("sma.period", self.sma.period)?;
        check_period("vwap.period", self.vwap.period)?;
        check_period("vwap.min_periods", self.vwap.min_periods)?;
        if self.vwap.min_periods > self.vwap.period {
            return Err(Error::config(format!(
                "vwap.min_periods ({}) exceeds vwap.period ({})",
                self.vwap.min_periods, self.vwap.period
            )));
        }
        check_period("rsi.period", self.rsi.period)?;
        check_period("macd.short_period", self.macd.short_period)?;
        check_period("macd.long_period", self.macd.long_period)?;
        check_period("macd.signal_period", self.macd.signal_period)?;
        // Sanity check only: the EMAs themselves accept any pair of spans.
        if self.macd.short_period >= self.macd.long_period {
            return Err(Error::config(format!(
                "macd.short_period ({}) must be below macd.long_period ({})",
                self.macd.short_period, self.macd.long_period
            )));
        }
        if self.regression.period < 2 {
            return Err(Error::config(format!(
                "regression.period must be at least 2, got {}",
                self.regression.period
            )));
        }
        if !self.regression.std_dev_multiplier.is_finite() {
            return Err(Error::config("regression.std_dev_multiplier must be finite"));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::config(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Rows an instrument needs before every configured factor is defined.
    pub fn warmup_rows(&self) -> usize {
        [
            self.momentum.period + 1,
            self.sma.period,
            self.vwap.min_periods,
            self.rsi.period,
            self.regression.period,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }
}

fn check_period(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::config(format!("{name} must be at least 1")));
    }
    Ok(())
}

/// Input column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Instrument identifier column (text).
    pub instrument: String,
    /// Timestamp column (epoch ms or datetime).
    pub timestamp: String,
    /// Price column.
    pub price: String,
    /// Volume column.
    pub volume: String,
    /// Earnings column; `None` disables the `pe` factor.
    pub earnings: Option<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            instrument: "ticker".to_string(),
            timestamp: "date".to_string(),
            price: "last".to_string(),
            volume: "volume".to_string(),
            earnings: None,
        }
    }
}

/// Momentum configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Lag in rows.
    pub period: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { period: 10 }
    }
}

/// Simple moving average configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaConfig {
    /// Window length in rows.
    pub period: usize,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self { period: 10 }
    }
}

/// Rolling VWAP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VwapConfig {
    /// Window length in rows.
    pub period: usize,
    /// Minimum non-missing observations for a value.
    pub min_periods: usize,
}

impl Default for VwapConfig {
    fn default() -> Self {
        Self {
            period: 10,
            min_periods: 2,
        }
    }
}

/// RSI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    /// Averaging window for gains and losses.
    pub period: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// MACD configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    /// Fast EMA span.
    pub short_period: usize,
    /// Slow EMA span.
    pub long_period: usize,
    /// Signal EMA span.
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            short_period: 12,
            long_period: 26,
            signal_period: 9,
        }
    }
}

/// Rolling regression configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Window length in rows.
    pub period: usize,
    /// Multiplier applied to the rolling standard deviation and variance.
    pub std_dev_multiplier: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            period: 14,
            std_dev_multiplier: 1.0,
        }
    }
}

/// Handling of instruments with fewer rows than the warm-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmupPolicy {
    /// Emit NaN while history is insufficient.
    #[default]
    Propagate,
    /// Fail the call with `Error::InsufficientData`.
    Reject,
}

/// Order of instrument groups in the output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentOrder {
    /// Order in which each instrument first appears in the input.
    #[default]
    FirstAppearance,
    /// Sorted by identifier.
    Lexicographic,
}
