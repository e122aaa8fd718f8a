//! Configuration for the cleaning pipeline.
//!
//! The stage sequence itself is fixed; configuration covers the input/output
//! paths and how much of the cleaned data is echoed back for inspection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a single cleaning run.
///
/// Use [`PipelineConfig::builder()`] for fluent construction.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaner::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .input_path("data/sales_raw.csv")
///     .output_path("outputs/sales_clean.csv")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the raw input CSV.
    pub input_path: PathBuf,

    /// Path the cleaned CSV is written to. Parent directories are created
    /// as needed.
    pub output_path: PathBuf,

    /// Number of cleaned rows echoed to the console for manual inspection.
    /// Default: 5
    pub sample_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/sales_raw.csv"),
            output_path: PathBuf::from("outputs/sales_clean.csv"),
            sample_rows: 5,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path"));
        }
        if self.input_path == self.output_path {
            return Err(ConfigValidationError::SamePath(self.input_path.clone()));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("'{0}' must not be empty")]
    EmptyPath(&'static str),

    #[error("input and output paths are both '{0}'; refusing to overwrite the raw input")]
    SamePath(PathBuf),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    sample_rows: Option<usize>,
}

impl PipelineConfigBuilder {
    /// Set the raw input CSV path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the cleaned output CSV path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set how many cleaned rows are echoed for inspection.
    pub fn sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_path: self.output_path.unwrap_or(defaults.output_path),
            sample_rows: self.sample_rows.unwrap_or(defaults.sample_rows),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.sample_rows, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .input_path("raw.csv")
            .output_path("out/clean.csv")
            .sample_rows(10)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("raw.csv"));
        assert_eq!(config.output_path, PathBuf::from("out/clean.csv"));
        assert_eq!(config.sample_rows, 10);
    }

    #[test]
    fn test_validation_rejects_same_path() {
        let result = PipelineConfig::builder()
            .input_path("sales.csv")
            .output_path("sales.csv")
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::SamePath(_)
        ));
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let result = PipelineConfig::builder().input_path("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath("input_path")
        ));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.input_path, deserialized.input_path);
        assert_eq!(config.sample_rows, deserialized.sample_rows);
    }
}
