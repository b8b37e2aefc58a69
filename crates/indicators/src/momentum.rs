//! Momentum and rate of change.
//!
//! Both compare each value with the value `period` rows earlier and are NaN
//! for the first `period` rows.

/// Price difference over `period` rows: `series[t] - series[t - period]`.
pub fn momentum(series: &[f64], period: usize) -> Vec<f64> {
    lagged(series, period, |now, then| now - then)
}

/// Fractional change over `period` rows: `(series[t] - series[t - period]) / series[t - period]`.
///
/// A zero base yields an infinite or NaN value rather than an error.
pub fn rate_of_change(series: &[f64], period: usize) -> Vec<f64> {
    lagged(series, period, |now, then| (now - then) / then)
}

fn lagged(series: &[f64], period: usize, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    series
        .iter()
        .enumerate()
        .map(|(t, &now)| match t.checked_sub(period) {
            Some(back) => f(now, series[back]),
            None => f64::NAN,
        })
        .collect()
}
