//! Log-volume On-Balance Volume (OBV).
//!
//! A running total that adds `ln(volume + epsilon)` on an up move, subtracts
//! it on a down move and carries the previous total when the price is
//! unchanged or the comparison is undefined. Starts at zero.
//!
//! Each value depends on the previous one, so the input must be in strict
//! time order for a single instrument.

/// Compute OBV from index-aligned close and volume series.
pub fn obv(close: &[f64], volume: &[f64], epsilon: f64) -> Vec<f64> {
    debug_assert_eq!(close.len(), volume.len());

    close
        .iter()
        .zip(volume)
        .scan((None::<f64>, 0.0), |(prev_close, total), (&price, &vol)| {
            if let Some(prev) = *prev_close {
                let log_volume = (vol + epsilon).ln();
                if price > prev {
                    *total += log_volume;
                } else if price < prev {
                    *total -= log_volume;
                }
            }
            *prev_close = Some(price);
            Some(*total)
        })
        .collect()
}
