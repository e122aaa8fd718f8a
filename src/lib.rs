//! Sales Data Cleaning Pipeline Library
//!
//! A batch cleaning pipeline for messy sales CSV exports, built on Polars.
//!
//! # Overview
//!
//! The pipeline takes a raw sales export and produces an analysis-ready
//! dataset through a fixed sequence of stages:
//!
//! - **Column Normalization**: header aliases mapped to a canonical schema
//! - **Text Normalization**: trimming, quote stripping, title-casing
//! - **Numeric Sanitization**: median fill/clamp for `price`, fill and
//!   sign-fold for `qty`
//! - **Date Normalization**: multi-format parsing with forward fill
//! - **Deduplication**: duplicate sales merged by summing quantities
//! - **Validation Report**: per-column summary and descriptive statistics
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sales_cleaner::{io, Pipeline};
//!
//! let df = io::load("data/sales_raw.csv")?;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()
//!     .process(df)?;
//!
//! println!("{}", result.report.render());
//! io::write(&mut result.data.clone(), "outputs/sales_clean.csv")?;
//! ```
//!
//! Running the pipeline over its own output leaves the data unchanged, so a
//! partially processed file can be fed back in safely.

pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod reporting;
pub mod stages;
pub mod utils;

pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use pipeline::{
    CleaningStage, CleaningSummary, ClosureProgressReporter, Pipeline, PipelineBuilder,
    PipelineResult, ProgressReporter, ProgressUpdate,
};
pub use reporting::{ColumnSummary, DescriptiveStats, ValidationReport};
pub use stages::{deduplicate, normalize_columns, normalize_dates, normalize_text, sanitize_numeric};
pub use utils::{clean_numeric_string, is_numeric_dtype, parse_numeric_string};
