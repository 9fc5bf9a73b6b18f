//! Error types for the application

use thiserror::Error;

/// Result type alias using our BotError
pub type Result<T> = std::result::Result<T, BotError>;

/// Main error type for bot operations
#[derive(Error, Debug)]
pub enum BotError {
    /// Missing or malformed configuration, detected before any network activity
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Order book or tick size could not be retrieved
    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(String),

    /// The venue rejected the order; body is kept verbatim
    #[error("Order submission failed with status {status}: {body}")]
    Submission { status: u16, body: String },

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Wallet or EIP-712 signing errors
    #[error("Signing error: {0}")]
    Signing(String),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        BotError::Configuration(err.to_string())
    }
}

impl From<ethers::signers::WalletError> for BotError {
    fn from(err: ethers::signers::WalletError) -> Self {
        BotError::Signing(err.to_string())
    }
}
