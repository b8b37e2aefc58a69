//! Simple and exponential moving averages.

use crate::rolling::RollingSum;

/// Simple moving average over `n` rows.
///
/// NaN until `n` observations are available and whenever the window holds a
/// NaN.
pub fn sma(series: &[f64], n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![f64::NAN; series.len()];
    }

    let mut window = RollingSum::new(n);
    series
        .iter()
        .map(|&value| {
            window.push(value);
            window.mean().unwrap_or(f64::NAN)
        })
        .collect()
}

/// Recursive exponential moving average with `alpha = 2 / (span + 1)`.
///
/// Seeded by the first observation, then
/// `ema[t] = (1 - alpha) * ema[t-1] + alpha * x[t]`. Leading NaNs stay NaN.
/// An interior NaN repeats the previous value and decays the weight of the
/// history, so the next observation is blended as
/// `(w * prev + alpha * x) / (w + alpha)` with `w = (1 - alpha)^(gap + 1)`.
pub fn ema(series: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return vec![f64::NAN; series.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;

    // (current average, weight carried by the history)
    series
        .iter()
        .scan(None::<(f64, f64)>, |state, &x| {
            *state = match *state {
                None if x.is_nan() => None,
                None => Some((x, 1.0)),
                Some((prev, weight)) => {
                    let weight = weight * decay;
                    if x.is_nan() {
                        Some((prev, weight))
                    } else {
                        Some(((weight * prev + alpha * x) / (weight + alpha), 1.0))
                    }
                }
            };
            Some(state.map_or(f64::NAN, |(avg, _)| avg))
        })
        .collect()
}
