//! The ordered cleaning stages.
//!
//! Each stage takes ownership of its input DataFrame and returns a new owned
//! DataFrame, so no stage can observe a later stage's mutations:
//!
//! 1. [`columns::normalize_columns`] — canonical column names
//! 2. [`text::normalize_text`] — trimmed, de-quoted, title-cased labels
//! 3. [`numeric::sanitize_numeric`] — coerced, filled, clamped `price`/`qty`
//! 4. [`dates::normalize_dates`] — parsed and forward-filled `date_sold`
//! 5. [`dedup::deduplicate`] — identity-key aggregation and date ordering

pub mod columns;
pub mod dates;
pub mod dedup;
pub mod numeric;
pub mod text;

pub use columns::normalize_columns;
pub use dates::normalize_dates;
pub use dedup::deduplicate;
pub use numeric::sanitize_numeric;
pub use text::{normalize_text, TEXT_COLUMNS};

/// Canonical column names the pipeline operates on once headers are
/// normalized.
pub const COL_PRODNAME: &str = "prodname";
pub const COL_CATEGORY: &str = "category";
pub const COL_PRICE: &str = "price";
pub const COL_QTY: &str = "qty";
pub const COL_DATE_SOLD: &str = "date_sold";
