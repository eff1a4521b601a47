//! # Wallet Provider Seam
//!
//! The injected wallet is an external collaborator. This module defines the
//! capability the lifecycle needs from it and the JSON-RPC shapes exchanged
//! with it:
//!
//! - [`WalletProvider`]: account access, read calls, transaction submission
//!   and receipt waits
//! - [`CallRequest`] / [`TransactionRequest`]: `eth_call` / `eth_sendTransaction` params
//! - [`Receipt`]: the subset of `eth_getTransactionReceipt` the lifecycle reads
//! - [`RpcFailure`]: a raw provider error, classified into [`LifecycleError`]
//!
//! The browser implementation lives in the web crate; tests use a mock.

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// EIP-1193 code for "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Capability supplied by a browser wallet.
///
/// All methods may suspend. Futures are not `Send`: everything runs on the
/// page's single thread.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Ask for account access. May open the wallet's approval prompt.
    async fn request_accounts(&self) -> Result<Vec<Address>, LifecycleError>;

    /// Accounts already authorized for this page. Never prompts.
    async fn current_accounts(&self) -> Result<Vec<Address>, LifecycleError>;

    /// Read-only contract call (`eth_call` at the latest block).
    async fn call(&self, request: CallRequest) -> Result<Bytes, LifecycleError>;

    /// Submit a transaction for signing. Resolves once the wallet has
    /// confirmed and broadcast it.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, LifecycleError>;

    /// Resolve once the transaction is included.
    async fn wait_for_receipt(&self, hash: B256) -> Result<Receipt, LifecycleError>;
}

/// Params object for `eth_call`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
}

/// Params object for `eth_sendTransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` when execution reverted.
    #[serde(default)]
    pub status: Option<U64>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status == U64::from(1u64))
    }
}

/// Error object returned by the provider before classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcFailure {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

impl RpcFailure {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
            || self.message.to_lowercase().contains("user rejected")
            || self.message.to_lowercase().contains("user denied")
    }

    fn is_execution_failure(&self) -> bool {
        let message = self.message.to_lowercase();
        message.contains("insufficient funds") || message.contains("revert")
    }

    /// Classify a failure of `eth_requestAccounts` / `eth_accounts`.
    pub fn into_connection_error(self) -> LifecycleError {
        if self.is_user_rejection() {
            LifecycleError::ConnectionRejected(self.message)
        } else {
            LifecycleError::NetworkFailure(self.message)
        }
    }

    /// Classify a failure of `eth_sendTransaction` or a receipt wait.
    pub fn into_transaction_error(self) -> LifecycleError {
        if self.is_user_rejection() {
            LifecycleError::TransactionRejected(self.message)
        } else if self.is_execution_failure() {
            LifecycleError::ExecutionReverted(self.message)
        } else {
            LifecycleError::NetworkFailure(self.message)
        }
    }

    /// Classify a failure of `eth_call`.
    pub fn into_read_error(self) -> LifecycleError {
        LifecycleError::NetworkFailure(self.message)
    }
}
