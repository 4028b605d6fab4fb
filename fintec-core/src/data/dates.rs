//! Permissive date/time coercion for index columns.
//!
//! Index values arrive in whatever shape the reader produced: native date or
//! datetime columns, text in one of many common layouts, or spreadsheet
//! serial numbers. Everything is normalized to `Datetime(ms)`.

use super::error::DataError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use polars::prelude::*;

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

// Month-first is tried before day-first, so "01/02/2020" is January 2nd and
// "13/01/2020" still parses as January 13th.
const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%d %b %Y",
    "%B %d, %Y",
];

/// Day zero of the spreadsheet serial date system (1900 date system).
fn serial_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// One textual layout the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Rfc3339,
    DateTime(&'static str),
    Date(&'static str),
}

impl Layout {
    fn parse(self, s: &str) -> Option<NaiveDateTime> {
        match self {
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()),
            Layout::DateTime(fmt) => NaiveDateTime::parse_from_str(s, fmt).ok(),
            Layout::Date(fmt) => NaiveDate::parse_from_str(s, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        }
    }
}

fn layouts() -> impl Iterator<Item = Layout> {
    std::iter::once(Layout::Rfc3339)
        .chain(DATETIME_FORMATS.into_iter().map(Layout::DateTime))
        .chain(DATE_FORMATS.into_iter().map(Layout::Date))
}

fn infer_layout(s: &str) -> Option<Layout> {
    let s = s.trim();
    layouts().find(|layout| layout.parse(s).is_some())
}

/// Parse a single textual date or datetime.
pub fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    layouts().find_map(|layout| layout.parse(s))
}

/// Convert a spreadsheet serial date (days since 1899-12-30, fraction = time of day).
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * 86_400_000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    serial_epoch().checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

/// Largest serial number that is still a spreadsheet date (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Interpret a number from an index column.
///
/// Whole numbers beyond the serial range are read as compact `yyyymmdd`
/// dates; everything else is a spreadsheet serial.
pub fn numeric_to_datetime(value: f64) -> Option<NaiveDateTime> {
    if value > MAX_SERIAL && value.fract() == 0.0 && value < 1e9 {
        let compact = format!("{}", value as i64);
        return NaiveDate::parse_from_str(&compact, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    serial_to_datetime(value)
}

pub fn millis_to_datetime(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

pub fn datetime_to_millis(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

fn datetime_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Coerce a column to `Datetime(ms)`. Nulls stay null.
pub fn coerce_datetime(series: &Series) -> Result<Series, DataError> {
    let name = series.name().clone();
    match series.dtype() {
        DataType::Datetime(TimeUnit::Milliseconds, None) => Ok(series.clone()),
        DataType::Datetime(_, _) | DataType::Date | DataType::Null => {
            Ok(series.cast(&datetime_dtype())?)
        }
        DataType::String => {
            let values = series.str()?;
            // The layout of the first value applies to the whole column, so
            // "31-12-2019" fixes day-first for "02-01-2020" below it.
            let layout = values
                .into_iter()
                .flatten()
                .find(|s| !s.trim().is_empty())
                .and_then(infer_layout);

            let mut millis = Vec::with_capacity(values.len());
            for value in values.into_iter() {
                let parsed = match value {
                    None => None,
                    Some(s) if s.trim().is_empty() => None,
                    Some(s) => {
                        let parsed = layout
                            .and_then(|layout| layout.parse(s.trim()))
                            .or_else(|| parse_datetime_str(s));
                        Some(parsed.ok_or_else(|| DataError::DateParse {
                            column: name.to_string(),
                            value: s.to_string(),
                        })?)
                    }
                };
                millis.push(parsed.map(datetime_to_millis));
            }
            Ok(Series::new(name, millis).cast(&datetime_dtype())?)
        }
        dtype if is_numeric(dtype) => {
            let floats = series.cast(&DataType::Float64)?;
            let mut millis = Vec::with_capacity(floats.len());
            for value in floats.f64()?.into_iter() {
                let parsed = match value {
                    None => None,
                    Some(v) if v.is_nan() => None,
                    Some(v) => Some(numeric_to_datetime(v).ok_or_else(|| DataError::DateParse {
                        column: name.to_string(),
                        value: v.to_string(),
                    })?),
                };
                millis.push(parsed.map(datetime_to_millis));
            }
            Ok(Series::new(name, millis).cast(&datetime_dtype())?)
        }
        dtype => Err(DataError::UnsupportedIndexType {
            column: name.to_string(),
            dtype: dtype.to_string(),
        }),
    }
}
