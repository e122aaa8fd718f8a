//! Duplicate aggregation and final ordering.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use tracing::{debug, info};

/// Identity key deciding when two rows represent the same underlying sale.
pub const IDENTITY_KEY: [&str; 4] = [
    super::COL_PRODNAME,
    super::COL_CATEGORY,
    super::COL_PRICE,
    super::COL_DATE_SOLD,
];

/// Merge rows sharing the identity key (`prodname`, `category`, `price`,
/// `date_sold`) by summing quantities, then sort by `date_sold` ascending
/// with a stable order for ties.
///
/// Because `price` has been normalized onto a small set of values via median
/// substitution, originally distinct noisy rows legitimately collide on this
/// key; that aggregation is intentional. Returns the dataset and the number
/// of rows eliminated by grouping.
pub fn deduplicate(df: DataFrame) -> Result<(DataFrame, usize)> {
    let column_order: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for key in IDENTITY_KEY {
        if !column_order.iter().any(|c| c == key) {
            return Err(CleaningError::ColumnNotFound(key.to_string()));
        }
    }

    let initial_rows = df.height();

    let key_exprs: Vec<Expr> = IDENTITY_KEY.iter().map(|name| col(*name)).collect();
    let mut agg_exprs: Vec<Expr> = vec![col(super::COL_QTY).sum()];
    for name in &column_order {
        if !IDENTITY_KEY.contains(&name.as_str()) && name != super::COL_QTY {
            // Equal by key within a group, so any member's value works.
            agg_exprs.push(col(name.as_str()).first());
        }
    }

    let df = df
        .lazy()
        .group_by_stable(key_exprs)
        .agg(agg_exprs)
        .sort(
            [super::COL_DATE_SOLD],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    let df = df.select(column_order.iter().map(|s| s.as_str()))?;

    let merged = initial_rows - df.height();
    if merged > 0 {
        info!("Merged {} duplicate rows by identity key", merged);
    } else {
        debug!("No duplicate rows to merge");
    }

    Ok((df, merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

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
    fn test_rows_sharing_key_collapse_and_sum_qty() {
        let df = polars::df!(
            "prodname" => &["Widget", "Widget"],
            "category" => &["Tools", "Tools"],
            "price" => &[7.5, 7.5],
            "qty" => &[3.0, 4.0],
            "date_sold" => &["2024-01-05", "2024-01-05"],
        )
        .unwrap();

        let (df, merged) = deduplicate(df).unwrap();
        assert_eq!(merged, 1);
        assert_eq!(df.height(), 1);
        assert_eq!(qty_values(&df), vec![Some(7.0)]);
    }

    #[test]
    fn test_distinct_keys_survive() {
        let df = polars::df!(
            "prodname" => &["Widget", "Widget", "Gadget"],
            "category" => &["Tools", "Tools", "Tools"],
            "price" => &[7.5, 10.0, 7.5],
            "qty" => &[1.0, 1.0, 1.0],
            "date_sold" => &["2024-01-05", "2024-01-05", "2024-01-05"],
        )
        .unwrap();

        let (df, merged) = deduplicate(df).unwrap();
        assert_eq!(merged, 0);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_output_sorted_by_date_ascending() {
        let df = polars::df!(
            "prodname" => &["A", "B", "C"],
            "category" => &["X", "X", "X"],
            "price" => &[1.0, 2.0, 3.0],
            "qty" => &[1.0, 1.0, 1.0],
            "date_sold" => &["2024-03-01", "2024-01-01", "2024-02-01"],
        )
        .unwrap();

        let (df, _) = deduplicate(df).unwrap();
        let names: Vec<Option<&str>> = df
            .column("prodname")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(names, vec![Some("B"), Some("C"), Some("A")]);
    }

    #[test]
    fn test_column_order_preserved() {
        let df = polars::df!(
            "prodname" => &["A"],
            "category" => &["X"],
            "price" => &[1.0],
            "qty" => &[1.0],
            "date_sold" => &["2024-03-01"],
        )
        .unwrap();

        let (df, _) = deduplicate(df).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["prodname", "category", "price", "qty", "date_sold"]
        );
    }

    #[test]
    fn test_missing_key_column_is_an_error() {
        let df = polars::df!("prodname" => &["A"], "qty" => &[1.0]).unwrap();
        let err = deduplicate(df).unwrap_err();
        assert!(matches!(err, CleaningError::ColumnNotFound(_)));
    }
}
