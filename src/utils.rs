//! Shared helpers used across the cleaning stages.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

/// Characters commonly used in numeric formatting that should be stripped
/// before parsing.
pub const NUMERIC_FORMAT_CHARS: [char; 5] = [',', '$', '%', '€', '£'];

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
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

/// Clean a string for numeric parsing by removing formatting characters.
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a finite numeric value.
///
/// Handles common formatting like currency symbols and thousands separators.
/// Non-finite results (`NaN`, infinities) count as unparseable so they land in
/// the missing-value channel instead of poisoning downstream aggregates.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Title-case a string: first letter of each word uppercased, the rest
/// lowercased.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Coerce any series to `Float64`, sending unparseable values to null.
///
/// Numeric dtypes are cast directly; string values go through
/// [`parse_numeric_string`]. Anything else becomes an all-null column of the
/// same length.
pub fn coerce_to_f64(series: &Series) -> PolarsResult<Series> {
    match series.dtype() {
        DataType::Float64 => Ok(series.clone()),
        dt if is_numeric_dtype(dt) => series.cast(&DataType::Float64),
        DataType::String => {
            let str_series = series.str()?;
            let values: Vec<Option<f64>> = str_series
                .into_iter()
                .map(|opt| opt.and_then(parse_numeric_string))
                .collect();
            Ok(Series::new(series.name().clone(), values))
        }
        DataType::Boolean => series.cast(&DataType::Float64),
        _ => Ok(Series::full_null(
            series.name().clone(),
            series.len(),
            &DataType::Float64,
        )),
    }
}
