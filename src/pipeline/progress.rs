//! Progress reporting for the cleaning pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_cleaner::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()
//!     .process(df);
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Normalizing column names to the canonical schema
    ColumnNames,
    /// Trimming and title-casing text fields
    TextFields,
    /// Coercing and repairing `price` and `qty`
    NumericFields,
    /// Parsing and forward-filling `date_sold`
    Dates,
    /// Merging duplicate rows and ordering output
    Deduplication,
    /// Building the validation report
    Reporting,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl CleaningStage {
    /// Human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ColumnNames => "Normalizing Columns",
            Self::TextFields => "Cleaning Text",
            Self::NumericFields => "Sanitizing Numbers",
            Self::Dates => "Normalizing Dates",
            Self::Deduplication => "Merging Duplicates",
            Self::Reporting => "Generating Report",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Typical share of total runtime for this stage (0.0 - 1.0).
    ///
    /// Weights sum to ~1.0 across the processing stages, excluding terminal
    /// states.
    pub fn weight(&self) -> f32 {
        match self {
            Self::ColumnNames => 0.10,
            Self::TextFields => 0.15,
            Self::NumericFields => 0.25,
            Self::Dates => 0.20,
            Self::Deduplication => 0.20,
            Self::Reporting => 0.10,
            Self::Complete => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::ColumnNames => 0.0,
            Self::TextFields => 0.10,
            Self::NumericFields => 0.25,
            Self::Dates => 0.50,
            Self::Deduplication => 0.70,
            Self::Reporting => 0.90,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within the current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Create a progress update for a stage.
    pub fn new(stage: CleaningStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Create a completion update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    /// Create a failure update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates during cleaning.
///
/// Implementations must be `Send + Sync` so the pipeline can run on a
/// background thread while updates are consumed elsewhere. Implementations
/// should be efficient and non-blocking.
pub trait ProgressReporter: Send + Sync {
    /// Called when the pipeline makes progress.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
