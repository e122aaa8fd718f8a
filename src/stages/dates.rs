//! Date normalization for `date_sold`.

use crate::error::{CleaningError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

/// Date formats tried in order when coercing textual dates.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Coerce `date_sold` to a date column, forward-fill gaps, and drop rows that
/// remain unresolvable.
///
/// Unparseable values become null, then each null takes the value of the
/// nearest preceding non-null value in current row order. Leading nulls have
/// no prior value to copy and their rows are dropped. Returns the dataset and
/// the number of rows removed.
pub fn normalize_dates(df: DataFrame) -> Result<(DataFrame, usize)> {
    let mut df = df;

    let series = df
        .column(super::COL_DATE_SOLD)
        .map_err(|_| CleaningError::ColumnNotFound(super::COL_DATE_SOLD.to_string()))?
        .as_materialized_series()
        .clone();

    let coerced = coerce_to_date(&series)?;
    let filled = coerced.fill_null(FillNullStrategy::Forward(None))?;
    df.replace(super::COL_DATE_SOLD, filled)?;

    let before = df.height();
    let mask = df
        .column(super::COL_DATE_SOLD)?
        .as_materialized_series()
        .is_not_null();
    let df = df.filter(&mask)?;
    let removed = before - df.height();

    if removed > 0 {
        info!("Dropped {} rows with unresolvable date_sold", removed);
    } else {
        debug!("No rows dropped for missing date_sold");
    }

    Ok((df, removed))
}

/// Coerce a series to `Date`, sending unparseable values to null.
fn coerce_to_date(series: &Series) -> Result<Series> {
    match series.dtype() {
        DataType::Date => Ok(series.clone()),
        DataType::Datetime(_, _) => Ok(series.cast(&DataType::Date)?),
        DataType::String => {
            let str_series = series.str()?;
            let dates: Vec<Option<NaiveDate>> = str_series
                .into_iter()
                .map(|opt| opt.and_then(parse_date))
                .collect();
            Ok(Series::new(series.name().clone(), dates))
        }
        _ => Ok(Series::full_null(
            series.name().clone(),
            series.len(),
            &DataType::Date,
        )),
    }
}

/// Parse a single textual date against the known formats.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dates_of(df: &DataFrame) -> Vec<Option<NaiveDate>> {
        df.column("date_sold")
            .unwrap()
            .as_materialized_series()
            .cast(&DataType::Int32)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .map(|opt| opt.map(|days| {
                NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Days::new(days as u64)
            }))
            .collect()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(parse_date("2024-02-01"), Some(expected));
        assert_eq!(parse_date("2024/02/01"), Some(expected));
        assert_eq!(parse_date("02/01/2024"), Some(expected));
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_unparseable_date_inherits_preceding_value() {
        let df = polars::df!(
            "date_sold" => &["2024-02-01", "not-a-date", "2024-02-03"],
            "qty" => &[1.0, 2.0, 3.0],
        )
        .unwrap();

        let (df, removed) = normalize_dates(df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 3);

        let dates = dates_of(&df);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 2, 3));
    }

    #[test]
    fn test_leading_missing_dates_are_dropped() {
        let df = polars::df!(
            "date_sold" => &["garbage", "2024-01-01"],
            "qty" => &[5.0, 6.0],
        )
        .unwrap();

        let (df, removed) = normalize_dates(df).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 1);

        let qty = df
            .column("qty")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0);
        assert_eq!(qty, Some(6.0));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = polars::df!("qty" => &[1.0]).unwrap();
        let err = normalize_dates(df).unwrap_err();
        assert!(matches!(err, CleaningError::ColumnNotFound(_)));
    }

    #[test]
    fn test_surviving_rows_have_valid_dates() {
        let df = polars::df!(
            "date_sold" => &["", "2024-03-05", "bad", ""],
            "qty" => &[1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();

        let (df, removed) = normalize_dates(df).unwrap();
        assert_eq!(removed, 1);
        assert!(dates_of(&df).iter().all(|d| d.is_some()));
    }
}
