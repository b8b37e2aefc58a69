//! Moving Average Convergence/Divergence (MACD).

use crate::moving_average::ema;
use serde::{Deserialize, Serialize};

/// MACD line and its signal line, index-aligned to the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Macd {
    /// Short EMA minus long EMA.
    pub line: Vec<f64>,
    /// EMA of the MACD line.
    pub signal: Vec<f64>,
}

/// Compute MACD with recursive EMAs of the given spans.
pub fn macd(series: &[f64], short_period: usize, long_period: usize, signal_period: usize) -> Macd {
    let short_ema = ema(series, short_period);
    let long_ema = ema(series, long_period);

    let line: Vec<f64> = short_ema
        .iter()
        .zip(&long_ema)
        .map(|(short, long)| short - long)
        .collect();
    let signal = ema(&line, signal_period);

    Macd { line, signal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_macd_starts_at_zero() {
        let result = macd(&[100.0, 101.0, 103.0, 102.0], 12, 26, 9);
        assert_eq!(result.line.len(), 4);
        assert_eq!(result.line[0], 0.0);
        assert_eq!(result.signal[0], 0.0);
    }

    #[test]
    fn test_macd_constant_series_is_flat() {
        let result = macd(&[50.0; 40], 12, 26, 9);
        assert!(result.line.iter().all(|v| v.abs() < 1e-10));
        assert!(result.signal.iter().all(|v| v.abs() < 1e-10));
    }

    #[test]
    fn test_macd_rising_series_is_positive() {
        let series: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let result = macd(&series, 12, 26, 9);
        assert!(result.line[1..].iter().all(|&v| v > 0.0));
        // signal lags the line on a steady trend
        assert!(result.signal[59] < result.line[59]);
    }

    #[test]
    fn test_macd_matches_component_emas() {
        let series = [10.0, 12.0, 11.0, 13.0, 15.0, 14.0];
        let result = macd(&series, 2, 4, 3);
        let short_ema = ema(&series, 2);
        let long_ema = ema(&series, 4);
        for t in 0..series.len() {
            assert_relative_eq!(result.line[t], short_ema[t] - long_ema[t]);
        }
        let signal = ema(&result.line, 3);
        assert_eq!(result.signal, signal);
    }
}
