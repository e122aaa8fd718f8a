//! Descriptive statistics for numeric report columns.

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Count/mean/std/min/quartiles/max for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Compute statistics over the non-null values of a series.
    ///
    /// Returns `Ok(None)` when the series has no non-null values (or is not
    /// coercible to floats), so callers can omit the section instead of
    /// failing.
    pub fn from_series(series: &Series) -> Result<Option<Self>> {
        let non_null = series.drop_nulls();
        if non_null.is_empty() {
            return Ok(None);
        }

        let float_series = match non_null.cast(&DataType::Float64) {
            Ok(s) => s,
            Err(_) => return Ok(None),
        };

        let mut values: Vec<f64> = float_series
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return Ok(None);
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = sample_std(&values, mean);

        Ok(Some(Self {
            count: n,
            mean,
            std,
            min: values[0],
            q1: percentile(&values, 0.25),
            median: percentile(&values, 0.5),
            q3: percentile(&values, 0.75),
            max: values[n - 1],
        }))
    }
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(sorted: &[f64], mean: f64) -> f64 {
    let n = sorted.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Percentile by linear interpolation between closest ranks over a sorted
/// slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p * (n - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let weight = rank - low as f64;
        sorted[low] * (1.0 - weight) + sorted[high] * weight
    }
}
