//! The cleaning pipeline and its builder.

use crate::error::Result;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::pipeline::{CleaningSummary, PipelineResult};
use crate::reporting::ValidationReport;
use crate::stages::{
    deduplicate, normalize_columns, normalize_dates, normalize_text, sanitize_numeric,
    TEXT_COLUMNS,
};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// The sales data cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to construct one. The pipeline is pure with
/// respect to I/O: it takes an in-memory dataset and returns a cleaned
/// dataset, a summary, and a validation report. Loading and writing live in
/// [`crate::io`].
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaner::Pipeline;
///
/// let result = Pipeline::builder()
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()
///     .process(df)?;
/// ```
pub struct Pipeline {
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// The pipeline may run on a background thread while progress is consumed
// elsewhere.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Run the full cleaning workflow over a dataset.
    ///
    /// Running the pipeline over its own output is a no-op: every stage maps
    /// already-clean values to themselves.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        match self.process_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Cleaning complete"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn stage_boundary(&self, stage: CleaningStage, message: &str) {
        info!("{}", message);
        self.report_progress(ProgressUpdate::new(stage, 0.0, message));
    }

    fn process_internal(&self, df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!(
            "Starting cleaning pipeline on {} rows x {} columns",
            df.height(),
            df.width()
        );

        let mut summary = CleaningSummary {
            rows_before: df.height(),
            ..CleaningSummary::default()
        };
        let mut steps: Vec<String> = Vec::new();

        self.stage_boundary(CleaningStage::ColumnNames, "Normalizing column names...");
        let df = normalize_columns(df)?;
        steps.push("Normalized column names to canonical schema".to_string());

        self.stage_boundary(CleaningStage::TextFields, "Cleaning text fields...");
        let df = normalize_text(df, &TEXT_COLUMNS)?;
        steps.push(format!(
            "Trimmed and title-cased text columns: {}",
            TEXT_COLUMNS.join(", ")
        ));

        self.stage_boundary(CleaningStage::NumericFields, "Sanitizing numeric fields...");
        let df = sanitize_numeric(df)?;
        steps.push("Repaired price (median fill/clamp) and qty (fill 1, abs)".to_string());

        self.stage_boundary(CleaningStage::Dates, "Normalizing dates...");
        let (df, dates_dropped) = normalize_dates(df)?;
        summary.rows_dropped_missing_date = dates_dropped;
        steps.push(format!(
            "Parsed date_sold, forward-filled gaps, dropped {} unresolvable rows",
            dates_dropped
        ));

        self.stage_boundary(CleaningStage::Deduplication, "Merging duplicate rows...");
        let (df, merged) = deduplicate(df)?;
        summary.duplicates_merged = merged;
        steps.push(format!(
            "Merged {} duplicate rows and sorted by date_sold",
            merged
        ));

        self.stage_boundary(CleaningStage::Reporting, "Building validation report...");
        let report = ValidationReport::build(&df)?;
        steps.push("Built validation report".to_string());

        summary.rows_after = df.height();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        summary.steps = steps;

        info!(
            "Pipeline finished: {} -> {} rows in {} ms",
            summary.rows_before, summary.rows_after, summary.duration_ms
        );

        Ok(PipelineResult {
            data: df,
            report,
            summary,
        })
    }
}

/// Builder for a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// Convenience over [`progress_reporter`](Self::progress_reporter) for
    /// simple handlers.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline {
            progress_reporter: self.progress_reporter,
        }
    }
}
