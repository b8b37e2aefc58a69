//! Rolling volume-weighted average price.
//!
//! Sum of `price * volume` over the trailing `period` rows divided by the sum
//! of `volume` over the same rows. Missing values are skipped inside each
//! sum; a sum built from fewer than `min_periods` values is undefined.

use crate::rolling::RollingSum;

/// Rolling VWAP over `period` rows, defined once `min_periods` values are seen.
pub fn vwap(price: &[f64], volume: &[f64], period: usize, min_periods: usize) -> Vec<f64> {
    debug_assert_eq!(price.len(), volume.len());
    if period == 0 {
        return vec![f64::NAN; price.len()];
    }

    let mut notional = RollingSum::new(period);
    let mut traded = RollingSum::new(period);

    price
        .iter()
        .zip(volume)
        .map(|(&p, &v)| {
            notional.push(p * v);
            traded.push(v);
            if notional.valid() >= min_periods && traded.valid() >= min_periods {
                notional.sum() / traded.sum()
            } else {
                f64::NAN
            }
        })
        .collect()
}
