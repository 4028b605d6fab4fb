//! Nearest-neighbor gap filling along the row axis.
//!
//! Only interior gaps are filled: a missing run needs a present value both
//! before and after it. Leading and trailing runs are left missing.

use super::error::DataError;
use super::frame::DatedFrame;
use polars::prelude::*;
use tracing::trace;

fn is_present(value: Option<f64>) -> bool {
    value.is_some_and(|v| !v.is_nan())
}

/// Fill interior gaps in `values` with the nearer of the two bounding values.
///
/// Distance is measured on `axis` (same length as `values`). Ties go to the
/// earlier row. Returns the filled values and how many were filled.
pub fn nearest_fill(values: &[Option<f64>], axis: &[i64]) -> (Vec<Option<f64>>, usize) {
    debug_assert_eq!(values.len(), axis.len());

    let mut out = values.to_vec();
    let mut filled = 0;
    let mut prev: Option<usize> = None;
    let mut i = 0;

    while i < values.len() {
        if is_present(values[i]) {
            prev = Some(i);
            i += 1;
            continue;
        }

        let gap_start = i;
        while i < values.len() && !is_present(values[i]) {
            i += 1;
        }

        // Gap touches either end: leave it.
        let Some(before) = prev else { continue };
        if i == values.len() {
            continue;
        }
        let after = i;

        for j in gap_start..after {
            let left = axis[j].abs_diff(axis[before]);
            let right = axis[after].abs_diff(axis[j]);
            out[j] = if right < left {
                values[after]
            } else {
                values[before]
            };
            filled += 1;
        }
    }

    (out, filled)
}

fn is_integer(dtype: &DataType) -> bool {
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
    )
}

fn is_float(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Apply [`nearest_fill`] to every numeric value column of `frame`.
///
/// Integer columns without gaps keep their type; any numeric column with gaps
/// comes back as `Float64`. Non-numeric columns are untouched.
pub fn interpolate_nearest(frame: &mut DatedFrame) -> Result<(), DataError> {
    let axis = frame.row_axis();

    for name in frame.value_columns() {
        let series = frame.column(&name)?;
        let dtype = series.dtype().clone();
        if !(is_integer(&dtype) || is_float(&dtype)) {
            continue;
        }
        if is_integer(&dtype) && series.null_count() == 0 {
            continue;
        }

        let values = frame.values(&name)?;
        let (out, filled) = nearest_fill(&values, &axis);
        trace!(column = %name, filled, "nearest interpolation");

        if filled > 0 || dtype != DataType::Float64 {
            frame
                .frame_mut()
                .with_column(Series::new(name.as_str().into(), out))?;
        }
    }

    Ok(())
}
