//! Conversion errors.

use std::path::PathBuf;

use crate::transcript::DevelopmentsError;

/// Errors that abort a transcript conversion.
///
/// Recoverable anomalies (unbalanced segment borders, zero-width dialogues)
/// are not errors: they are logged and the offending unit is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Transcript has no header row")]
    MissingHeader,

    #[error("Error on row {row}: expected 6 to 8 fields, got {fields}: {content:?}")]
    MalformedRow {
        row: usize,
        fields: usize,
        content: String,
    },

    #[error("Error on row {row}: cannot parse developments {value:?}: {source}")]
    MalformedDevelopments {
        row: usize,
        value: String,
        #[source]
        source: DevelopmentsError,
    },

    #[error("Cannot derive output file names from {0:?}")]
    OutputName(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read transcript: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Write(#[from] std::io::Error),
}

impl ConversionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;
