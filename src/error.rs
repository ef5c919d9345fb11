//! Error types for WalletBook
//!
//! A single thiserror enum covers the whole crate. Errors split into two
//! classes: recoverable ones the console loop reports and re-prompts on,
//! and session-state errors (no authenticated user, no active wallet) that
//! indicate a broken command flow and abort the session after a final save.

use thiserror::Error;

use crate::models::Money;

/// The main error type for WalletBook operations
#[derive(Error, Debug)]
pub enum WalletbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for user input and domain rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Insufficient funds for a transfer
    #[error("Insufficient funds in wallet '{wallet}': need {needed}, have {available}")]
    InsufficientFunds {
        wallet: String,
        needed: Money,
        available: Money,
    },

    /// A user-scoped operation was invoked with no authenticated user
    #[error("No authenticated user in session")]
    NoActiveUser,

    /// A wallet-scoped operation was invoked with no active wallet
    #[error("No active wallet in session")]
    NoActiveWallet,
}

impl WalletbookError {
    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for wallets
    pub fn duplicate_wallet(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the console loop may report this error and re-prompt.
    ///
    /// Session-state errors (`NoActiveUser`, `NoActiveWallet`) and storage
    /// failures are not recoverable at a prompt; they end the operation flow.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound { .. }
                | Self::Duplicate { .. }
                | Self::InsufficientFunds { .. }
        )
    }
}

impl From<std::io::Error> for WalletbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for WalletBook operations
pub type WalletbookResult<T> = Result<T, WalletbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletbookError::wallet_not_found("Savings");
        assert_eq!(err.to_string(), "Wallet not found: Savings");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = WalletbookError::InsufficientFunds {
            wallet: "Main".into(),
            needed: Money::from_cents(5000),
            available: Money::from_cents(3000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in wallet 'Main': need $50.00, have $30.00"
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(WalletbookError::duplicate_wallet("Main").is_recoverable());
        assert!(WalletbookError::Validation("bad".into()).is_recoverable());
        assert!(!WalletbookError::NoActiveUser.is_recoverable());
        assert!(!WalletbookError::NoActiveWallet.is_recoverable());
        assert!(!WalletbookError::Storage("disk".into()).is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: WalletbookError = io_err.into();
        assert!(matches!(err, WalletbookError::Io(_)));
    }
}
