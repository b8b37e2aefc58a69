//! Factor computation engine.
//!
//! Applies the full indicator set to one instrument's price series.

use crate::{
    macd::macd,
    momentum::{momentum, rate_of_change},
    moving_average::sma,
    obv::obv,
    regression::regression_factors,
    rsi::rsi,
    valuation::price_to_earnings,
    vwap::vwap,
};
use factor_core::{Config, Factor, FactorRow, PriceSeries};
use std::collections::BTreeMap;
use tracing::trace;

/// Factor series for one instrument, keyed by factor in column order.
#[derive(Debug, Clone, Default)]
pub struct FactorColumns {
    columns: BTreeMap<Factor, Vec<f64>>,
    len: usize,
}

impl FactorColumns {
    fn insert(&mut self, factor: Factor, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.len);
        self.columns.insert(factor, values);
    }

    /// Series for a factor, if computed.
    pub fn get(&self, factor: Factor) -> Option<&[f64]> {
        self.columns.get(&factor).map(|v| v.as_slice())
    }

    /// Computed factors in column order.
    pub fn factors(&self) -> Vec<Factor> {
        self.columns.keys().copied().collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Values of row `t` in column order.
    pub fn row(&self, t: usize) -> Vec<f64> {
        self.columns.values().map(|series| series[t]).collect()
    }

    /// Turn the columns into output rows tagged with `instrument`.
    pub fn into_rows(self, instrument: &str, series: &PriceSeries) -> Vec<FactorRow> {
        (0..self.len)
            .map(|t| FactorRow {
                instrument: instrument.to_string(),
                ts_ms: series.ts_ms[t],
                values: self.row(t),
            })
            .collect()
    }
}

/// Factor computation engine.
#[derive(Debug, Clone)]
pub struct FactorEngine {
    config: Config,
}

impl FactorEngine {
    /// Create a new factor engine from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Factor columns produced for series with or without earnings.
    pub fn factors(&self, with_earnings: bool) -> Vec<Factor> {
        Factor::ALL
            .into_iter()
            .filter(|f| with_earnings || !f.requires_earnings())
            .collect()
    }

    /// Rows needed before every factor is defined.
    pub fn warmup_rows(&self) -> usize {
        self.config.warmup_rows()
    }

    /// Check if a series is long enough to leave warm-up.
    pub fn is_ready(&self, series: &PriceSeries) -> bool {
        series.len() >= self.warmup_rows()
    }

    /// Compute every factor for one instrument.
    ///
    /// `series` must be sorted by time.
    pub fn compute(&self, series: &PriceSeries) -> FactorColumns {
        let cfg = &self.config;
        let close = &series.close;
        let mut out = FactorColumns {
            columns: BTreeMap::new(),
            len: series.len(),
        };

        out.insert(Factor::Momentum, momentum(close, cfg.momentum.period));
        out.insert(Factor::Roc, rate_of_change(close, cfg.momentum.period));
        out.insert(Factor::Sma, sma(close, cfg.sma.period));
        out.insert(
            Factor::Vwap,
            vwap(close, &series.volume, cfg.vwap.period, cfg.vwap.min_periods),
        );
        out.insert(Factor::Rsi, rsi(close, cfg.rsi.period));

        let macd_out = macd(
            close,
            cfg.macd.short_period,
            cfg.macd.long_period,
            cfg.macd.signal_period,
        );
        out.insert(Factor::Macd, macd_out.line);
        out.insert(Factor::MacdSignal, macd_out.signal);

        out.insert(Factor::Obv, obv(close, &series.volume, cfg.epsilon));

        if let Some(earnings) = &series.earnings {
            out.insert(Factor::Pe, price_to_earnings(close, earnings, cfg.epsilon));
        }

        let reg = regression_factors(
            close,
            cfg.regression.period,
            cfg.regression.std_dev_multiplier,
        );
        out.insert(Factor::LinearReg, reg.linear_reg);
        out.insert(Factor::LinearRegAngle, reg.linear_reg_angle);
        out.insert(Factor::Intercept, reg.intercept);
        out.insert(Factor::Slope, reg.slope);
        out.insert(Factor::Stddev, reg.stddev);
        out.insert(Factor::Tsf, reg.tsf);
        out.insert(Factor::Var, reg.var);

        trace!(rows = out.len, factors = out.columns.len(), "computed factor columns");
        out
    }
}
