//! Column name normalization.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Raw-header aliases mapped onto the canonical role names after mechanical
/// normalization. Keeps `Product Name`-style header variants working without
/// schema inference.
const COLUMN_ALIASES: [(&str, &str); 7] = [
    ("product_name", super::COL_PRODNAME),
    ("prod_name", super::COL_PRODNAME),
    ("product", super::COL_PRODNAME),
    ("quantity", super::COL_QTY),
    ("unit_price", super::COL_PRICE),
    ("sale_date", super::COL_DATE_SOLD),
    ("date", super::COL_DATE_SOLD),
];

/// Rewrite every column name into canonical form: trimmed, lowercased,
/// ASCII-only, whitespace runs collapsed to a single underscore.
///
/// Fails loudly with [`CleaningError::DuplicateColumn`] when two distinct raw
/// headers normalize to the same name, rather than silently merging columns.
pub fn normalize_columns(df: DataFrame) -> Result<DataFrame> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut renamed = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let raw = column.name().to_string();
        let normalized = normalize_name(&raw);

        if let Some(previous) = seen.insert(normalized.clone(), raw.clone()) {
            return Err(CleaningError::DuplicateColumn(format!(
                "'{previous}' and '{raw}' both normalize to '{normalized}'"
            )));
        }

        if normalized != raw {
            debug!("Renamed column '{}' -> '{}'", raw, normalized);
        }

        let mut column = column.clone();
        column.rename(normalized.into());
        renamed.push(column);
    }

    Ok(DataFrame::new(renamed)?)
}

/// Normalize a single header: trim, lowercase, keep ASCII alphanumerics and
/// underscores, collapse whitespace runs to one underscore, trim underscore
/// artifacts at the ends. Known aliases then map onto the canonical roles.
fn normalize_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let filtered: String = lowered
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '_')
        .collect();

    let name = filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .trim_matches('_')
        .to_string();

    for (alias, canonical) in COLUMN_ALIASES {
        if name == alias {
            return canonical.to_string();
        }
    }
    name
}
