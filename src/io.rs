//! CSV loading and writing collaborators.
//!
//! Only these two touch the filesystem. The loader classifies failures as
//! [`CleaningError::NotFound`] or [`CleaningError::Load`]; the writer creates
//! parent directories and classifies failures as [`CleaningError::Write`].

use crate::error::{CleaningError, Result};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Load a CSV file into a DataFrame, first row as headers.
///
/// Returns [`CleaningError::NotFound`] when the path does not exist and
/// [`CleaningError::Load`] for any other read or parse failure. A second read
/// pass over pre-cleaned content handles files with stray quote artifacts.
pub fn load(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CleaningError::NotFound(path.to_path_buf()));
    }

    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => {
            info!(
                "Loaded {} rows x {} columns from {}",
                df.height(),
                df.width(),
                path.display()
            );
            return Ok(df);
        }
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: pre-clean content and retry
    let content = fs::read_to_string(path).map_err(|e| CleaningError::Load {
        path: path.to_path_buf(),
        source: PolarsError::ComputeError(format!("could not read file: {e}").into()),
    })?;

    let cleaned = clean_csv_content(&content);
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| CleaningError::Load {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!(
        "Loaded {} rows x {} columns from {} (after content cleanup)",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Strip doubled-quote artifacts and blank lines before a retry parse.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persist a DataFrame as CSV with a header row, creating parent directories
/// as needed. Column order follows the DataFrame's current order.
pub fn write(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CleaningError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let file = fs::File::create(path).map_err(|e| CleaningError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .map_err(|e| CleaningError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    info!(
        "Wrote {} rows x {} columns to {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(())
}
