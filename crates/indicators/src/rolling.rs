//! Rolling window sum.
//!
//! Fixed-length window over a value stream with a running sum of the
//! non-missing values.

use std::collections::VecDeque;

/// Rolling sum over the last `window` pushed values.
///
/// NaN values occupy a slot in the window but do not contribute to the sum.
#[derive(Debug, Clone)]
pub struct RollingSum {
    /// Window size in observations.
    window: usize,
    /// Values currently in the window.
    values: VecDeque<f64>,
    /// Running sum of non-NaN values.
    sum: f64,
    /// Number of non-NaN values in the window.
    valid: usize,
    /// Number of non-NaN, non-zero values in the window.
    nonzero: usize,
}

impl RollingSum {
    /// Create a new rolling sum. `window` must be at least 1.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
            valid: 0,
            nonzero: 0,
        }
    }

    /// Push a value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.window {
            if let Some(old) = self.values.pop_front() {
                if !old.is_nan() {
                    self.sum -= old;
                    self.valid -= 1;
                    if old != 0.0 {
                        self.nonzero -= 1;
                    }
                }
            }
        }

        self.values.push_back(value);
        if !value.is_nan() {
            self.sum += value;
            self.valid += 1;
            if value != 0.0 {
                self.nonzero += 1;
            }
        }

        // Running subtraction leaves residue once every contributor is zero.
        if self.nonzero == 0 {
            self.sum = 0.0;
        }
    }

    /// Sum of the non-NaN values in the window.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of non-NaN values in the window.
    pub fn valid(&self) -> usize {
        self.valid
    }

    /// Number of values in the window.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the window holds `window` values, none of them NaN.
    pub fn is_complete(&self) -> bool {
        self.values.len() >= self.window && self.valid == self.window
    }

    /// Mean over a complete window.
    pub fn mean(&self) -> Option<f64> {
        if self.is_complete() {
            Some(self.sum / self.window as f64)
        } else {
            None
        }
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.values.clear();
        self.sum = 0.0;
        self.valid = 0;
        self.nonzero = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_complete() {
        let mut sum = RollingSum::new(3);
        sum.push(1.0);
        sum.push(2.0);
        assert!(!sum.is_complete());
        assert!(sum.mean().is_none());
        assert_eq!(sum.valid(), 2);
    }

    #[test]
    fn test_rolling_window() {
        let mut sum = RollingSum::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            sum.push(v);
        }
        assert_eq!(sum.len(), 3);
        assert!((sum.sum() - 12.0).abs() < 1e-10);
        assert!((sum.mean().unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_nan_occupies_slot() {
        let mut sum = RollingSum::new(3);
        sum.push(1.0);
        sum.push(f64::NAN);
        sum.push(3.0);
        assert_eq!(sum.len(), 3);
        assert_eq!(sum.valid(), 2);
        assert!((sum.sum() - 4.0).abs() < 1e-10);
        assert!(sum.mean().is_none());

        // NaN evicted after two more pushes
        sum.push(4.0);
        assert!(sum.mean().is_none());
        sum.push(5.0);
        assert_eq!(sum.valid(), 3);
        assert!((sum.mean().unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_all_zero_window_is_exactly_zero() {
        let mut sum = RollingSum::new(2);
        sum.push(0.1);
        sum.push(0.2);
        sum.push(0.0);
        sum.push(0.0);
        assert_eq!(sum.sum(), 0.0);
    }

    #[test]
    fn test_clear() {
        let mut sum = RollingSum::new(2);
        sum.push(1.0);
        sum.clear();
        assert!(sum.is_empty());
        assert_eq!(sum.sum(), 0.0);
    }
}
