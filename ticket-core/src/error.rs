//! # Lifecycle Error Types
//!
//! Every failure the wallet/contract lifecycle can surface to the user.
//!
//! ## Error Categories
//!
//! - **ProviderAbsent**: no injected wallet, fatal for the page session
//! - **ConnectionRejected**: the user declined account access (retryable)
//! - **ValidationFailed**: local input check failed, no network call was made
//! - **TransactionRejected**: the user declined to sign
//! - **ExecutionReverted**: the contract rejected the call (insufficient funds, over-withdraw)
//! - **NetworkFailure**: transport or RPC failure (retryable)
//! - **SubmissionInFlight**: a second submission while one is still outstanding
//! - **SessionChanged**: the active account changed underneath a submission
//!
//! None of these are retried automatically. Every retry is the user repeating
//! the action.
//!
//! ## Example
//!
//! ```rust
//! use ticket_core::error::{ErrorKind, LifecycleError};
//!
//! let err = LifecycleError::ValidationFailed("Quantity must be a positive integer".to_string());
//! assert_eq!(err.kind(), ErrorKind::ValidationFailed);
//! assert_eq!(err.to_string(), "Validation error: Quantity must be a positive integer");
//! ```

use thiserror::Error;

/// Error surfaced by any lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// No wallet-capable provider was injected into the page.
    #[error("Wallet required: install or enable a browser wallet extension")]
    ProviderAbsent,

    /// Account access was declined or returned no accounts.
    #[error("Connection rejected: {0}")]
    ConnectionRejected(String),

    /// User input failed validation. No network call was issued.
    #[error("Validation error: {0}")]
    ValidationFailed(String),

    /// The user declined to sign the transaction in the wallet.
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// The contract rejected the call, either at estimation or after inclusion.
    #[error("Execution reverted: {0}")]
    ExecutionReverted(String),

    /// Transport, RPC or decoding failure.
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// A submission is already outstanding for this session.
    #[error("A transaction is already pending; wait for it to settle")]
    SubmissionInFlight,

    /// The active account changed while the operation was suspended.
    #[error("Account changed while the transaction was pending")]
    SessionChanged,
}

/// Discriminant of [`LifecycleError`] without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ProviderAbsent,
    ConnectionRejected,
    ValidationFailed,
    TransactionRejected,
    ExecutionReverted,
    NetworkFailure,
    SubmissionInFlight,
    SessionChanged,
}

impl LifecycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifecycleError::ProviderAbsent => ErrorKind::ProviderAbsent,
            LifecycleError::ConnectionRejected(_) => ErrorKind::ConnectionRejected,
            LifecycleError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            LifecycleError::TransactionRejected(_) => ErrorKind::TransactionRejected,
            LifecycleError::ExecutionReverted(_) => ErrorKind::ExecutionReverted,
            LifecycleError::NetworkFailure(_) => ErrorKind::NetworkFailure,
            LifecycleError::SubmissionInFlight => ErrorKind::SubmissionInFlight,
            LifecycleError::SessionChanged => ErrorKind::SessionChanged,
        }
    }

    /// Whether repeating the same action could succeed without the user
    /// changing anything in the page.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LifecycleError::ConnectionRejected(_)
                | LifecycleError::TransactionRejected(_)
                | LifecycleError::NetworkFailure(_)
                | LifecycleError::SubmissionInFlight
                | LifecycleError::SessionChanged
        )
    }

    /// Session-fatal errors are logged at `error`, the rest at `warn`.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LifecycleError::ProviderAbsent)
    }

    /// Text shown in the notice banner.
    pub fn user_message(&self) -> String {
        match self {
            LifecycleError::ProviderAbsent => {
                "A browser wallet such as MetaMask is necessary to continue.".to_string()
            }
            LifecycleError::ConnectionRejected(_) => {
                "Wallet connection was not approved.".to_string()
            }
            LifecycleError::ValidationFailed(msg) => msg.clone(),
            LifecycleError::TransactionRejected(_) => {
                "Transaction was rejected in the wallet.".to_string()
            }
            LifecycleError::ExecutionReverted(msg) => format!("The contract rejected the transaction: {msg}"),
            LifecycleError::NetworkFailure(msg) => format!("Network error, please retry: {msg}"),
            LifecycleError::SubmissionInFlight => {
                "Please wait for the pending transaction to settle.".to_string()
            }
            LifecycleError::SessionChanged => {
                "The wallet account changed. Review your balances.".to_string()
            }
        }
    }

    /// Log the error at the level matching its severity.
    pub fn log(&self, context: &str) {
        if self.is_fatal() {
            log::error!("[{}] {}", context, self);
        } else {
            log::warn!("[{}] {}", context, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LifecycleError::NetworkFailure("timeout".to_string());
        assert_eq!(err.to_string(), "Network error: timeout");

        let err = LifecycleError::ExecutionReverted("insufficient funds".to_string());
        assert_eq!(err.to_string(), "Execution reverted: insufficient funds");
    }

    #[test]
    fn test_retryable() {
        assert!(LifecycleError::NetworkFailure(String::new()).is_retryable());
        assert!(LifecycleError::ConnectionRejected(String::new()).is_retryable());
        assert!(!LifecycleError::ProviderAbsent.is_retryable());
        assert!(!LifecycleError::ValidationFailed(String::new()).is_retryable());
        assert!(!LifecycleError::ExecutionReverted(String::new()).is_retryable());
    }

    #[test]
    fn test_only_provider_absent_is_fatal() {
        assert!(LifecycleError::ProviderAbsent.is_fatal());
        assert!(!LifecycleError::SessionChanged.is_fatal());
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = LifecycleError::ValidationFailed("Enter a whole number of tickets".to_string());
        assert_eq!(err.user_message(), "Enter a whole number of tickets");
    }
}
