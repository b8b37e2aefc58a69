//! Relative Strength Index (RSI).
//!
//! Gains and losses are averaged with a simple moving average over `period`
//! rows. A row whose change is undefined (the first row, or a NaN on either
//! side) counts as zero gain and zero loss.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), evaluated with IEEE
//! semantics: avg_loss == 0 with avg_gain > 0 gives 100, a window with no
//! movement at all gives NaN.

use crate::rolling::RollingSum;

/// RSI over `period` rows. First value at index `period - 1`.
pub fn rsi(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; series.len()];
    }

    let mut gains = RollingSum::new(period);
    let mut losses = RollingSum::new(period);

    series
        .iter()
        .enumerate()
        .map(|(t, &value)| {
            let delta = if t == 0 { f64::NAN } else { value - series[t - 1] };
            gains.push(if delta > 0.0 { delta } else { 0.0 });
            losses.push(if delta < 0.0 { -delta } else { 0.0 });

            match (gains.mean(), losses.mean()) {
                (Some(avg_gain), Some(avg_loss)) => rsi_from_averages(avg_gain, avg_loss),
                _ => f64::NAN,
            }
        })
        .collect()
}

#[inline]
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
