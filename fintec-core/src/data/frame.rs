//! The loaded, date-indexed table.

use super::dates::{coerce_datetime, millis_to_datetime};
use super::error::DataError;
use chrono::NaiveDateTime;
use polars::prelude::*;

/// A table whose leading column(s) form the row index.
///
/// Rows keep source order; nothing here sorts or deduplicates the index.
#[derive(Debug, Clone)]
pub struct DatedFrame {
    frame: DataFrame,
    index: Vec<String>,
}

impl DatedFrame {
    /// Wrap `frame`, moving the `index` columns to the front in the given order.
    pub fn new(frame: DataFrame, index: Vec<String>) -> Result<Self, DataError> {
        let mut order = index.clone();
        order.extend(
            frame
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .filter(|name| !index.contains(name)),
        );
        let frame = frame.select(order)?;
        Ok(Self { frame, index })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Names of the index columns, outermost level first. Empty when rows are
    /// identified by position only.
    pub fn index_names(&self) -> &[String] {
        &self.index
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Names of the non-index columns, in frame order.
    pub fn value_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .filter(|name| !self.index.contains(name))
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Series, DataError> {
        self.frame
            .column(name)
            .map(|c| c.as_materialized_series())
            .map_err(|_| DataError::ColumnNotFound {
                column: format!("'{name}'"),
                available: self.frame.get_column_names().iter().map(|n| n.to_string()).collect(),
            })
    }

    /// Values of a numeric column as `f64`.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>, DataError> {
        let floats = self.column(name)?.cast(&DataType::Float64)?;
        Ok(floats.f64()?.into_iter().collect())
    }

    /// The outermost index level as datetimes. Empty when there is no index.
    pub fn dates(&self) -> Result<Vec<Option<NaiveDateTime>>, DataError> {
        let Some(level) = self.index.first() else {
            return Ok(Vec::new());
        };
        let millis = self.column(level)?.cast(&DataType::Int64)?;
        Ok(millis
            .i64()?
            .into_iter()
            .map(|v| v.and_then(millis_to_datetime))
            .collect())
    }

    /// Convert every index level to `Datetime(ms)`.
    pub fn coerce_index(&mut self) -> Result<(), DataError> {
        for level in self.index.clone() {
            let coerced = coerce_datetime(self.column(&level)?)?;
            self.frame.with_column(coerced)?;
        }
        Ok(())
    }

    /// Positions along the row axis used to measure "nearest".
    ///
    /// Index timestamps when the index is a single fully populated datetime
    /// column; plain row numbers otherwise.
    pub fn row_axis(&self) -> Vec<i64> {
        let positions = || -> Vec<i64> { (0..self.height() as i64).collect() };
        let [level] = self.index.as_slice() else {
            return positions();
        };
        let Ok(series) = self.column(level) else {
            return positions();
        };
        if !matches!(series.dtype(), DataType::Datetime(_, _)) || series.null_count() > 0 {
            return positions();
        }
        match series.cast(&DataType::Int64) {
            Ok(ms) => match ms.i64() {
                Ok(ca) => ca.into_no_null_iter().collect(),
                Err(_) => positions(),
            },
            Err(_) => positions(),
        }
    }
}
