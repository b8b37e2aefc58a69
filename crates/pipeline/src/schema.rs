//! Input column resolution.
//!
//! Pulls the configured columns out of an [`InputTable`] and checks their
//! presence, kinds and lengths before any instrument is processed.

use factor_core::{config::ColumnConfig, InputTable, Result, TimestampMs};

/// Validated, typed view of the columns the pipeline needs.
#[derive(Debug, Clone)]
pub struct ResolvedInput<'a> {
    /// Instrument identifier per row.
    pub instruments: &'a [String],
    /// Timestamp per row.
    pub ts_ms: Vec<TimestampMs>,
    /// Price per row.
    pub close: Vec<f64>,
    /// Volume per row.
    pub volume: Vec<f64>,
    /// Earnings per row, when configured.
    pub earnings: Option<Vec<f64>>,
}

impl<'a> ResolvedInput<'a> {
    /// Resolve the configured columns of `table`.
    pub fn resolve(table: &'a InputTable, columns: &ColumnConfig) -> Result<Self> {
        table.check_lengths()?;

        let instruments = table.text(&columns.instrument)?;
        let ts_ms = table.timestamps(&columns.timestamp)?;
        let close = table.numeric(&columns.price)?;
        let volume = table.numeric(&columns.volume)?;
        let earnings = columns
            .earnings
            .as_deref()
            .map(|name| table.numeric(name))
            .transpose()?;

        Ok(Self {
            instruments,
            ts_ms,
            close,
            volume,
            earnings,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
