//! Error types for payment processing

use crate::crypto::EncryptionError;
use paywarden_validation::ValidationErrors;
use thiserror::Error;

/// Payment error types
///
/// The facade never wraps or rewrites these: whatever the validator, the
/// encryptor or the provider produced is what the caller receives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    /// Request failed structural validation; raised before any provider call
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Sensitive field encryption failed
    #[error("Encryption error: {0}")]
    Encryption(#[from] EncryptionError),

    /// Card declined
    #[error("Card declined: {0}")]
    CardDeclined(String),

    /// Insufficient funds
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Payment method not found
    #[error("Payment method not found: {0}")]
    PaymentMethodNotFound(String),

    /// Duplicate transaction
    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(String),

    /// Provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limited
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u32),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl PaymentError {
    /// Short stable label, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Encryption(_) => "encryption",
            Self::CardDeclined(_) => "card_declined",
            Self::InsufficientFunds => "insufficient_funds",
            Self::CustomerNotFound(_) => "customer_not_found",
            Self::PaymentMethodNotFound(_) => "payment_method_not_found",
            Self::DuplicateTransaction(_) => "duplicate_transaction",
            Self::Provider(_) => "provider",
            Self::Network(_) => "network",
            Self::RateLimited(_) => "rate_limited",
            Self::Authentication(_) => "authentication",
        }
    }

    /// Whether the error originated in the provider rather than in this crate
    pub fn is_provider_error(&self) -> bool {
        !matches!(self, Self::Validation(_) | Self::Encryption(_))
    }
}

/// Result type for payment operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid encryption key: {0}")]
    Encryption(#[from] EncryptionError),
}
