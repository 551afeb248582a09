//! Error types for mtg_common

use thiserror::Error;

/// Unified error type for catalog operations
#[derive(Debug, Error)]
pub enum CommonError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Reading or writing the local cache failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Card name is not present in the oracle catalog
    #[error("Card not found in oracle catalog: {0}")]
    NotInCatalog(String),
    /// Card is present but carries no rules text
    #[error("No oracle text for card: {0}")]
    MissingOracleText(String),
}

/// Result alias for mtg_common operations
pub type Result<T> = std::result::Result<T, CommonError>;
