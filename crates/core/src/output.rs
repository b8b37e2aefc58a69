//! Output factor table.

use crate::types::{Factor, TimestampMs};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// One output row: an instrument at a timestamp with its factor values.
///
/// `values` is aligned with [`FactorTable::factors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRow {
    /// Instrument identifier.
    pub instrument: String,
    /// Observation timestamp.
    #[serde(rename = "timestamp")]
    pub ts_ms: TimestampMs,
    /// Factor values in table column order. NaN during warm-up,
    /// written as `null`.
    #[serde(with = "nan_as_null")]
    pub values: Vec<f64>,
}

impl FactorRow {
    /// View the row as a factor name to value mapping.
    pub fn to_map(&self, factors: &[Factor]) -> BTreeMap<&'static str, f64> {
        factors
            .iter()
            .zip(&self.values)
            .map(|(f, &v)| (f.name(), v))
            .collect()
    }
}

/// Undefined values travel as `null`, since JSON has no NaN.
mod nan_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| (!v.is_nan()).then_some(*v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

/// Concatenated per-instrument factor rows.
///
/// Rows are grouped by instrument (in the pipeline's instrument order) and
/// ascending by timestamp within each group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactorTable {
    /// Factor columns, in order.
    pub factors: Vec<Factor>,
    /// Rows.
    pub rows: Vec<FactorRow>,
}

impl FactorTable {
    /// Create an empty table with the given factor columns.
    pub fn new(factors: Vec<Factor>) -> Self {
        Self {
            factors,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a factor among the columns.
    pub fn factor_index(&self, factor: Factor) -> Option<usize> {
        self.factors.iter().position(|&f| f == factor)
    }

    /// Value of `factor` in row `row`.
    pub fn value(&self, row: usize, factor: Factor) -> Option<f64> {
        let idx = self.factor_index(factor)?;
        self.rows.get(row).and_then(|r| r.values.get(idx).copied())
    }

    /// Extract a whole factor column.
    pub fn column(&self, factor: Factor) -> Option<Vec<f64>> {
        let idx = self.factor_index(factor)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// Rows belonging to `instrument`.
    pub fn rows_for<'a>(&'a self, instrument: &'a str) -> impl Iterator<Item = &'a FactorRow> {
        self.rows.iter().filter(move |r| r.instrument == instrument)
    }

    /// Distinct instruments in row order.
    pub fn instruments(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if out.last() != Some(&row.instrument.as_str()) {
                out.push(&row.instrument);
            }
        }
        out
    }

    /// Append the rows of another table with the same columns.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = FactorRow>) {
        self.rows.extend(rows);
    }
}
