//! Valuation ratios.

/// Price to earnings ratio: `price / (earnings + epsilon)`.
///
/// `epsilon` keeps exactly-zero earnings from dividing by zero; pass
/// [`factor_core::ZERO_GUARD_EPSILON`] unless configured otherwise.
pub fn price_to_earnings(price: &[f64], earnings: &[f64], epsilon: f64) -> Vec<f64> {
    debug_assert_eq!(price.len(), earnings.len());

    price
        .iter()
        .zip(earnings)
        .map(|(p, e)| p / (e + epsilon))
        .collect()
}
