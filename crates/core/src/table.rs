//! In-memory columnar input table.
//!
//! Readers (CSV, parquet, databases) live outside this workspace and hand the
//! engine an [`InputTable`] of named, typed columns.

use crate::error::{Error, Result};
use crate::types::{datetime_to_ms, TimestampMs};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed column storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColumnData {
    /// Text values (instrument identifiers).
    Text(Vec<String>),
    /// Integer values (epoch-millisecond timestamps, integer volumes).
    Int(Vec<i64>),
    /// Floating point values (prices, volumes, earnings).
    Float(Vec<f64>),
    /// UTC datetimes.
    DateTime(Vec<DateTime<Utc>>),
}

impl ColumnData {
    /// Number of values in the column.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::DateTime(v) => v.len(),
        }
    }

    /// Whether the column is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnData::Text(_) => "text",
            ColumnData::Int(_) => "int",
            ColumnData::Float(_) => "float",
            ColumnData::DateTime(_) => "datetime",
        }
    }
}

/// A named column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column values.
    pub data: ColumnData,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// A table of named columns of equal length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputTable {
    columns: Vec<Column>,
}

impl InputTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing any existing column with the same name.
    pub fn with_column(mut self, name: impl Into<String>, data: ColumnData) -> Self {
        self.insert(Column::new(name, data));
        self
    }

    /// Insert a column, replacing any existing column with the same name.
    pub fn insert(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows (length of the first column, 0 for an empty table).
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Check that every column has the same number of rows.
    pub fn check_lengths(&self) -> Result<()> {
        let expected = self.num_rows();
        for column in &self.columns {
            if column.data.len() != expected {
                return Err(Error::column_length(
                    &column.name,
                    expected,
                    column.data.len(),
                ));
            }
        }
        Ok(())
    }

    fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::missing_column(name))
    }

    /// Borrow a text column.
    pub fn text(&self, name: &str) -> Result<&[String]> {
        let column = self.require(name)?;
        match &column.data {
            ColumnData::Text(v) => Ok(v),
            other => Err(Error::column_type(name, "text", other.kind())),
        }
    }

    /// Read a numeric column as `f64`; integer columns are widened.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.require(name)?;
        match &column.data {
            ColumnData::Float(v) => Ok(v.clone()),
            ColumnData::Int(v) => Ok(v.iter().map(|&x| x as f64).collect()),
            other => Err(Error::column_type(name, "float", other.kind())),
        }
    }

    /// Read a timestamp column as epoch milliseconds.
    ///
    /// Accepts integer milliseconds or UTC datetimes.
    pub fn timestamps(&self, name: &str) -> Result<Vec<TimestampMs>> {
        let column = self.require(name)?;
        match &column.data {
            ColumnData::Int(v) => Ok(v.clone()),
            ColumnData::DateTime(v) => Ok(v.iter().map(datetime_to_ms).collect()),
            other => Err(Error::column_type(name, "timestamp", other.kind())),
        }
    }
}
