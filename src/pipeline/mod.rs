//! Pipeline orchestration.
//!
//! Wires the cleaning stages together in their fixed order and tracks what
//! each run did to the data.

pub mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};

use crate::reporting::ValidationReport;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// What a pipeline run did to the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Row count before any stage ran
    pub rows_before: usize,
    /// Row count of the cleaned output
    pub rows_after: usize,
    /// Rows dropped because `date_sold` could not be resolved
    pub rows_dropped_missing_date: usize,
    /// Rows eliminated by merging duplicates
    pub duplicates_merged: usize,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
    /// Human-readable description of each stage's work, in order
    pub steps: Vec<String>,
}

/// Output of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The cleaned dataset
    pub data: DataFrame,
    /// Validation report over the cleaned dataset
    pub report: ValidationReport,
    /// Accounting of what the run changed
    pub summary: CleaningSummary,
}
