//! Numeric sanitization for `price` and `qty`.

use crate::error::Result;
use crate::utils::coerce_to_f64;
use polars::prelude::*;
use tracing::{debug, warn};

/// Fill value for missing quantities.
const QTY_FILL: f64 = 1.0;

/// Coerce `price` and `qty` to numeric and apply the missing/invalid-value
/// policy.
///
/// `price`: values that fail coercion become null; the column median is
/// computed once over the coerced column (before any fill, including values
/// <= 0), then nulls are filled with it and every value <= 0 is overwritten
/// with the same median. Known degenerate case: when every price is
/// missing/invalid the median is undefined and the fill is a no-op, leaving
/// the column all-null.
///
/// `qty`: nulls are filled with 1, then every value is replaced by its
/// absolute value — a negative quantity is a return and is folded into a
/// positive count, not removed.
pub fn sanitize_numeric(df: DataFrame) -> Result<DataFrame> {
    let mut df = df;

    let price = df
        .column(super::COL_PRICE)
        .ok()
        .map(|col| col.as_materialized_series().clone());
    match price {
        Some(series) => {
            let coerced = coerce_to_f64(&series)?;
            let sanitized = sanitize_price(&coerced)?;
            df.replace(super::COL_PRICE, sanitized)?;
        }
        None => debug!("Column 'price' absent, skipping numeric sanitization for it"),
    }

    let qty = df
        .column(super::COL_QTY)
        .ok()
        .map(|col| col.as_materialized_series().clone());
    match qty {
        Some(series) => {
            let coerced = coerce_to_f64(&series)?;
            let sanitized = sanitize_qty(&coerced)?;
            df.replace(super::COL_QTY, sanitized)?;
        }
        None => debug!("Column 'qty' absent, skipping numeric sanitization for it"),
    }

    Ok(df)
}

/// Median-fill nulls and median-clamp non-positive prices.
///
/// The median is computed exactly once per invocation; recomputing after the
/// fill would change which rows land on the median boundary.
fn sanitize_price(series: &Series) -> Result<Series> {
    let Some(median) = series.median() else {
        warn!("All price values missing or invalid; median undefined, fill skipped");
        return Ok(series.clone());
    };

    let values: Vec<Option<f64>> = series
        .f64()?
        .into_iter()
        .map(|opt| match opt {
            Some(v) if v > 0.0 => Some(v),
            _ => Some(median),
        })
        .collect();

    debug!("Price median for fill/clamp: {}", median);
    Ok(Series::new(series.name().clone(), values))
}

/// Fill missing quantities with 1 and fold negative quantities (returns) into
/// positive counts.
fn sanitize_qty(series: &Series) -> Result<Series> {
    let values: Vec<Option<f64>> = series
        .f64()?
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(QTY_FILL).abs()))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn price_values(df: &DataFrame) -> Vec<Option<f64>> {
        df.column("price")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn qty_values(df: &DataFrame) -> Vec<Option<f64>> {
        df.column("qty")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_price_median_fills_missing_and_clamps_non_positive() {
        // Coerced prices: [-5, null, 10, 10, 7.5, 7.5]
        // Median over non-null values [-5, 7.5, 7.5, 10, 10] = 7.5
        let df = polars::df!(
            "price" => &["-5", "oops", "10", "10", "7.5", "7.5"],
            "qty" => &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();

        let df = sanitize_numeric(df).unwrap();
        assert_eq!(
            price_values(&df),
            vec![
                Some(7.5),
                Some(7.5),
                Some(10.0),
                Some(10.0),
                Some(7.5),
                Some(7.5)
            ]
        );
    }

    #[test]
    fn test_price_zero_is_clamped() {
        // Median over [0, 4, 8] = 4; zero is non-positive so it is clamped too.
        let df = polars::df!("price" => &[0.0, 4.0, 8.0]).unwrap();
        let df = sanitize_numeric(df).unwrap();
        assert_eq!(price_values(&df), vec![Some(4.0), Some(4.0), Some(8.0)]);
    }

    #[test]
    fn test_price_all_missing_stays_null() {
        let df = polars::df!("price" => &["oops", "", "n?a"]).unwrap();
        let df = sanitize_numeric(df).unwrap();
        let prices = price_values(&df);
        assert!(prices.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_qty_missing_fills_with_one_and_negatives_flip_sign() {
        let df = polars::df!(
            "qty" => &[Some("3"), None, Some("-2"), Some("bad")],
        )
        .unwrap();

        let df = sanitize_numeric(df).unwrap();
        assert_eq!(
            qty_values(&df),
            vec![Some(3.0), Some(1.0), Some(2.0), Some(1.0)]
        );
    }

    #[test]
    fn test_numeric_invariant_holds() {
        let df = polars::df!(
            "price" => &["-5", "3", "abc", "12"],
            "qty" => &["-4", "", "2", "0"],
        )
        .unwrap();

        let df = sanitize_numeric(df).unwrap();
        assert!(price_values(&df).iter().all(|v| v.unwrap() > 0.0));
        assert!(qty_values(&df).iter().all(|v| v.unwrap() >= 0.0));
    }

    #[test]
    fn test_sanitize_skips_absent_columns() {
        let df = polars::df!("prodname" => &["a"]).unwrap();
        let df = sanitize_numeric(df).unwrap();
        assert_eq!(df.width(), 1);
    }
}
