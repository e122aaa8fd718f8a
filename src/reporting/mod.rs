//! Validation report over the cleaned dataset.
//!
//! The report is a read-only summary: per-column dtype and null counts plus
//! descriptive statistics for the numeric sales columns. It never mutates the
//! dataset it describes.

pub mod statistics;

pub use statistics::DescriptiveStats;

use crate::error::Result;
use crate::stages::{COL_PRICE, COL_QTY};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of the per-column breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

/// Summary of a cleaned dataset, suitable for rendering or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generated_at: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
    /// Descriptive statistics for `price`; `None` when the column is absent
    /// or entirely null.
    pub price: Option<DescriptiveStats>,
    /// Descriptive statistics for `qty`; `None` when the column is absent or
    /// entirely null.
    pub qty: Option<DescriptiveStats>,
}

impl ValidationReport {
    /// Build a report from a dataset.
    pub fn build(df: &DataFrame) -> Result<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnSummary {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                null_count: col.null_count(),
            })
            .collect();

        let price = numeric_stats(df, COL_PRICE)?;
        let qty = numeric_stats(df, COL_QTY)?;

        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            row_count: df.height(),
            column_count: df.width(),
            columns,
            price,
            qty,
        })
    }

    /// Render the report as human-readable text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&"=".repeat(80));
        out.push('\n');
        out.push_str("SALES DATA CLEANING REPORT\n");
        out.push_str(&format!("Generated: {}\n", self.generated_at));
        out.push_str(&"=".repeat(80));
        out.push('\n');
        out.push('\n');

        out.push_str(&format!(
            "Rows: {}    Columns: {}\n\n",
            self.row_count, self.column_count
        ));

        out.push_str(&format!("{:<20} {:<15} {:>12}\n", "Column", "Type", "Nulls"));
        out.push_str(&format!("{}\n", "-".repeat(49)));
        for col in &self.columns {
            out.push_str(&format!(
                "{:<20} {:<15} {:>12}\n",
                col.name, col.dtype, col.null_count
            ));
        }
        out.push('\n');

        if let Some(stats) = &self.price {
            out.push_str(&render_stats("price", stats));
        }
        if let Some(stats) = &self.qty {
            out.push_str(&render_stats("qty", stats));
        }

        out.push_str(&"=".repeat(80));
        out.push('\n');
        out
    }
}

fn numeric_stats(df: &DataFrame, name: &str) -> Result<Option<DescriptiveStats>> {
    match df.column(name) {
        Ok(col) => DescriptiveStats::from_series(col.as_materialized_series()),
        Err(_) => Ok(None),
    }
}

fn render_stats(name: &str, stats: &DescriptiveStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Statistics for '{}':\n", name));
    out.push_str(&format!("  count:  {}\n", stats.count));
    out.push_str(&format!("  mean:   {:.4}\n", stats.mean));
    out.push_str(&format!("  std:    {:.4}\n", stats.std));
    out.push_str(&format!("  min:    {:.4}\n", stats.min));
    out.push_str(&format!("  25%:    {:.4}\n", stats.q1));
    out.push_str(&format!("  50%:    {:.4}\n", stats.median));
    out.push_str(&format!("  75%:    {:.4}\n", stats.q3));
    out.push_str(&format!("  max:    {:.4}\n", stats.max));
    out.push('\n');
    out
}
