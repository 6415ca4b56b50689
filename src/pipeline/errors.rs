use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error on [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error
    },
    #[error("Input [{}] is missing required column(s): {}", path.display(), columns.join(", "))]
    MissingColumns {
        path: PathBuf,
        columns: Vec<String>
    },
    #[error("Input [{}] has no header row", path.display())]
    EmptyInput {
        path: PathBuf
    },
    #[error("Input [{}] is not a readable CSV file: {source}", path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error
    },
    #[error("Input [{}] is not a readable spreadsheet: {message}", path.display())]
    Spreadsheet {
        path: PathBuf,
        message: String
    },
    #[error("Totals for SKU [{sku}] exceed the supported numeric range")]
    Overflow {
        sku: String
    },
    #[error("Invalid configuration in [{}]: {message}", path.display())]
    Config {
        path: PathBuf,
        message: String
    }
}

impl PipelineError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn missing_columns(path: &Path, columns: Vec<String>) -> Self {
        Self::MissingColumns { path: path.to_path_buf(), columns }
    }

    pub fn empty_input(path: &Path) -> Self {
        Self::EmptyInput { path: path.to_path_buf() }
    }

    /// CSV failures that wrap an I/O error stay in the I/O class.
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        if source.is_io_error() {
            if let csv::ErrorKind::Io(error) = source.into_kind() {
                return Self::io(path, error);
            }

            return Self::io(path, io::Error::other("CSV I/O failure"));
        }

        Self::Csv { path: path.to_path_buf(), source }
    }

    pub fn spreadsheet(path: &Path, message: impl ToString) -> Self {
        Self::Spreadsheet { path: path.to_path_buf(), message: message.to_string() }
    }

    pub fn overflow(sku: &str) -> Self {
        Self::Overflow { sku: sku.to_string() }
    }

    pub fn config(path: &Path, message: impl ToString) -> Self {
        Self::Config { path: path.to_path_buf(), message: message.to_string() }
    }

    /// Process exit code: 3 for I/O failures, 2 for bad input files, out-of-range totals or configuration.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Io { .. } => 3,
            _ => 2
        }
    }
}
