//! Text column normalization.

use crate::error::Result;
use crate::utils::{collapse_whitespace, title_case};
use polars::prelude::*;
use tracing::debug;

/// Default text columns the pipeline normalizes.
pub const TEXT_COLUMNS: [&str; 2] = [super::COL_PRODNAME, super::COL_CATEGORY];

/// Normalize the named text columns: stringify non-text values, trim, strip
/// embedded double quotes, collapse whitespace runs, title-case.
///
/// Columns absent from the dataset are skipped silently; the stage is total.
pub fn normalize_text(df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut df = df;

    for &col_name in columns {
        let series = match df.column(col_name) {
            Ok(col) => col.as_materialized_series().clone(),
            Err(_) => {
                debug!("Text column '{}' absent, skipping", col_name);
                continue;
            }
        };

        let as_strings = series.cast(&DataType::String)?;
        let str_series = as_strings.str()?;

        let cleaned: Vec<Option<String>> = str_series
            .into_iter()
            .map(|opt| opt.map(clean_label))
            .collect();

        df.replace(col_name, Series::new(col_name.into(), cleaned))?;
        debug!("Normalized text column '{}'", col_name);
    }

    Ok(df)
}

/// Clean one label value.
fn clean_label(value: &str) -> String {
    let without_quotes = value.replace('"', "");
    title_case(&collapse_whitespace(&without_quotes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("  Widget "), "Widget");
        assert_eq!(clean_label("\"widget\"  pro"), "Widget Pro");
        assert_eq!(clean_label("POWER   tools"), "Power Tools");
    }

    #[test]
    fn test_normalize_text_titlecases_and_trims() {
        let df = polars::df!(
            "prodname" => &["  Widget ", "gadget  PRO"],
            "category" => &["tools", "\"gizmos\""],
            "price" => &[1.0, 2.0],
        )
        .unwrap();

        let df = normalize_text(df, &TEXT_COLUMNS).unwrap();

        let prodname = df.column("prodname").unwrap().as_materialized_series().str().unwrap();
        assert_eq!(prodname.get(0), Some("Widget"));
        assert_eq!(prodname.get(1), Some("Gadget Pro"));

        let category = df.column("category").unwrap().as_materialized_series().str().unwrap();
        assert_eq!(category.get(0), Some("Tools"));
        assert_eq!(category.get(1), Some("Gizmos"));
    }

    #[test]
    fn test_normalize_text_skips_absent_column() {
        let df = polars::df!("price" => &[1.0]).unwrap();
        let df = normalize_text(df, &TEXT_COLUMNS).unwrap();
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_normalize_text_stringifies_numeric_column() {
        let df = polars::df!("prodname" => &[42i64, 7]).unwrap();
        let df = normalize_text(df, &["prodname"]).unwrap();

        let prodname = df.column("prodname").unwrap().as_materialized_series().str().unwrap();
        assert_eq!(prodname.get(0), Some("42"));
        assert_eq!(prodname.get(1), Some("7"));
    }

    #[test]
    fn test_normalize_text_preserves_nulls() {
        let df = polars::df!("category" => &[Some("tools"), None]).unwrap();
        let df = normalize_text(df, &["category"]).unwrap();

        let category = df.column("category").unwrap().as_materialized_series().str().unwrap();
        assert_eq!(category.get(0), Some("Tools"));
        assert_eq!(category.get(1), None);
    }
}
