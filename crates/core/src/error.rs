//! Error types for the certify core crate.

use thiserror::Error;

/// Top-level error type for configuration, I/O and transport failures.
#[derive(Debug, Error)]
pub enum CertifyError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error: {0}")]
    Sheets(String),

    #[error("render error: {0}")]
    Render(String),
}

/// A convenience Result alias that defaults to [`CertifyError`].
pub type Result<T> = std::result::Result<T, CertifyError>;

/// Why a certificate lookup produced no record.
///
/// Every variant renders as the same "Not Found" page; the detail only
/// reaches the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unsupported sheet: {0}")]
    UnsupportedSheet(String),

    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),

    #[error("ID column missing: {0}")]
    ColumnMissing(String),

    #[error("record {id} not found in sheet {sheet}")]
    RecordNotFound { sheet: String, id: String },

    #[error("network failure: {0}")]
    NetworkFailure(String),
}

impl LookupError {
    /// Short machine-friendly name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::UnsupportedSheet(_) => "unsupported_sheet",
            LookupError::InvalidResponseShape(_) => "invalid_response_shape",
            LookupError::ColumnMissing(_) => "column_missing",
            LookupError::RecordNotFound { .. } => "record_not_found",
            LookupError::NetworkFailure(_) => "network_failure",
        }
    }
}

impl From<CertifyError> for LookupError {
    fn from(err: CertifyError) -> Self {
        LookupError::NetworkFailure(err.to_string())
    }
}
