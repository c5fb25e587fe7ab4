use std::path::PathBuf;
use thiserror::Error;

pub type TidyVcfResult<T> = std::result::Result<T, TidyVcfError>;

#[derive(Debug, Error)]
pub enum TidyVcfError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Failed to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
    #[error("--sites (-s) OR --thin (-t) should be used, not both")]
    ConflictingSelection,
    #[error("Thinning distance must be a positive integer, got {value}")]
    InvalidThin { value: u64 },
    #[error("Output path is used more than once: {}", path.display())]
    DuplicateOutputPath { path: PathBuf },
    #[error(
        "No #CHROM header line found before the first record (line {line}); sample identifiers are unknown"
    )]
    MissingColumnHeader { line: usize },
    #[error("Malformed record at line {line}: expected at least 9 fields, found {found}")]
    TooFewFields { line: usize, found: usize },
    #[error(
        "Malformed record at line {line}: header declares {expected} samples but the record has {found} sample columns"
    )]
    SampleCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },
}

impl TidyVcfError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}

#[macro_export]
macro_rules! tidy_error {
    ($($arg:tt)*) => {
        $crate::error::TidyVcfError::message(format!($($arg)*))
    };
}
