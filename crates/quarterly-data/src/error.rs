//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// OpenDART answered with a non-success status code
    #[error("OpenDART API error {status}: {message}")]
    DartApi {
        /// Status code reported by the API (`"000"` means success)
        status: String,
        /// Human readable message reported by the API
        message: String,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Missing data
    #[error("Missing data for {corp_code}: {reason}")]
    MissingData {
        /// Corp code that was queried
        corp_code: String,
        /// Reason for missing data
        reason: String,
    },

    /// Invalid corp code
    #[error("Invalid corp code: {0}")]
    InvalidCorpCode(String),

    /// API key was not configured
    #[error("OpenDART API key is not configured")]
    MissingApiKey,

    /// Company name not present in the directory
    #[error("Company not found in directory: {0}")]
    CompanyNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::DeError> for DataError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::XmlParse(err.to_string())
    }
}
