//! Error types for the finance tracker
//!
//! The ledger, parser and classifier never fail; these variants belong to
//! the outer surfaces (market feed, configuration, HTTP).

use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Error, Debug)]
pub enum TrackerError {

    // =============================
    // Surface Errors
    // =============================

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}
