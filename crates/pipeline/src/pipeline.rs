//! Factor pipeline.
//!
//! Validates the input table, partitions it by instrument, computes every
//! factor per partition and concatenates the tagged rows.

use crate::partition::{partition_by_instrument, InstrumentPartition};
use crate::schema::ResolvedInput;
use factor_core::{
    config::WarmupPolicy, Config, Error, FactorRow, FactorTable, InputTable, Result,
};
use factor_indicators::FactorEngine;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Batch factor pipeline over a multi-instrument table.
#[derive(Debug, Clone)]
pub struct FactorPipeline {
    engine: FactorEngine,
}

impl FactorPipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: FactorEngine::new(&config),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        self.engine.config()
    }

    /// Compute the factor table for every instrument in `table`.
    ///
    /// Output rows are grouped by instrument in the configured instrument
    /// order and ascending by timestamp within each group; equal timestamps
    /// keep their input order.
    pub fn compute(&self, table: &InputTable) -> Result<FactorTable> {
        let started = Instant::now();

        let input = ResolvedInput::resolve(table, &self.config().columns)?;
        let partitions = partition_by_instrument(&input, self.config().instrument_order);

        for partition in &partitions {
            if partition.duplicate_timestamps > 0 {
                warn!(
                    instrument = %partition.instrument,
                    duplicates = partition.duplicate_timestamps,
                    "duplicate timestamps, keeping input order"
                );
            }
        }
        if self.config().warmup == WarmupPolicy::Reject {
            self.check_history(&partitions)?;
        }

        let per_instrument: Vec<Vec<FactorRow>> = if self.config().parallel {
            partitions
                .par_iter()
                .map(|partition| self.compute_partition(partition))
                .collect()
        } else {
            partitions
                .iter()
                .map(|partition| self.compute_partition(partition))
                .collect()
        };

        let mut out = FactorTable::new(self.engine.factors(input.earnings.is_some()));
        out.rows.reserve(input.len());
        for rows in per_instrument {
            out.extend(rows);
        }

        info!(
            instruments = partitions.len(),
            rows = out.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "factor table computed"
        );
        Ok(out)
    }

    /// Compute the factor rows of one partition.
    pub fn compute_partition(&self, partition: &InstrumentPartition) -> Vec<FactorRow> {
        debug!(
            instrument = %partition.instrument,
            rows = partition.series.len(),
            "computing factors"
        );
        self.engine
            .compute(&partition.series)
            .into_rows(&partition.instrument, &partition.series)
    }

    fn check_history(&self, partitions: &[InstrumentPartition]) -> Result<()> {
        let required = self.engine.warmup_rows();
        match partitions.iter().find(|p| !self.engine.is_ready(&p.series)) {
            Some(short) => Err(Error::insufficient_data(format!(
                "instrument '{}' has {} rows, {} required",
                short.instrument,
                short.series.len(),
                required
            ))),
            None => Ok(()),
        }
    }
}
