//! Instrument partitioning.
//!
//! Groups input rows by instrument and sorts each group by timestamp.
//! The sort is stable: rows sharing a timestamp keep their input order,
//! which fixes the step order seen by OBV and the EMAs.

use crate::schema::ResolvedInput;
use factor_core::{config::InstrumentOrder, PriceSeries};
use std::collections::HashMap;

/// All rows of one instrument, sorted by time.
#[derive(Debug, Clone)]
pub struct InstrumentPartition {
    /// Instrument identifier.
    pub instrument: String,
    /// Time-sorted price history.
    pub series: PriceSeries,
    /// Rows whose timestamp equals the previous row's.
    pub duplicate_timestamps: usize,
}

/// Split `input` into one partition per instrument.
pub fn partition_by_instrument(
    input: &ResolvedInput<'_>,
    order: InstrumentOrder,
) -> Vec<InstrumentPartition> {
    // Row indices per instrument, in order of first appearance.
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (row, instrument) in input.instruments.iter().enumerate() {
        let slot = *slots.entry(instrument.as_str()).or_insert_with(|| {
            groups.push((instrument.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }

    if order == InstrumentOrder::Lexicographic {
        groups.sort_by(|a, b| a.0.cmp(b.0));
    }

    groups
        .into_iter()
        .map(|(instrument, mut rows)| {
            rows.sort_by_key(|&row| input.ts_ms[row]);
            build_partition(input, instrument, &rows)
        })
        .collect()
}

fn build_partition(input: &ResolvedInput<'_>, instrument: &str, rows: &[usize]) -> InstrumentPartition {
    let pick = |values: &[f64]| -> Vec<f64> { rows.iter().map(|&r| values[r]).collect() };

    let series = PriceSeries {
        ts_ms: rows.iter().map(|&r| input.ts_ms[r]).collect(),
        close: pick(&input.close),
        volume: pick(&input.volume),
        earnings: input.earnings.as_deref().map(pick),
    };
    let duplicate_timestamps = series.ts_ms.windows(2).filter(|w| w[0] == w[1]).count();

    InstrumentPartition {
        instrument: instrument.to_string(),
        series,
        duplicate_timestamps,
    }
}
