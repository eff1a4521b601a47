//! # Contract Binding
//!
//! A [`ContractBinding`] scopes every call to the one configured contract and
//! one signing account. It is derived from `(provider, account)` and rebuilt
//! whenever the account changes; a binding is never re-pointed at another
//! account.
//!
//! The contract interface is fixed at build time:
//!
//! ```text
//! getSpentTotal()            view    returns (uint256)
//! getTicketsOwned()          view    returns (uint256)
//! purchaseTickets(uint256)   payable
//! withdraw(uint256)
//! ```

use std::rc::Rc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall, SolValue};

use crate::error::LifecycleError;
use crate::intent::{TransactionIntent, TxKind};
use crate::provider::{CallRequest, Receipt, TransactionRequest, WalletProvider};

sol! {
    interface ITicketBooth {
        function getSpentTotal() external view returns (uint256);
        function getTicketsOwned() external view returns (uint256);
        function purchaseTickets(uint256 quantity) external payable;
        function withdraw(uint256 quantity) external;
    }
}

/// Signer-backed handle to the ticket contract.
pub struct ContractBinding<P> {
    provider: Rc<P>,
    contract: Address,
    account: Address,
    /// Incremented by the session each time the account changes.
    generation: u64,
}

impl<P> Clone for ContractBinding<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            contract: self.contract,
            account: self.account,
            generation: self.generation,
        }
    }
}

impl<P> std::fmt::Debug for ContractBinding<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractBinding")
            .field("contract", &self.contract)
            .field("account", &self.account)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<P: WalletProvider> ContractBinding<P> {
    pub fn new(provider: Rc<P>, contract: Address, account: Address, generation: u64) -> Self {
        log::debug!(
            "[BINDING] Bound {} to contract {} (generation {})",
            account,
            contract,
            generation
        );
        Self {
            provider,
            contract,
            account,
            generation,
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total value the bound account has paid for tickets, in base units.
    pub async fn spent_total(&self) -> Result<U256, LifecycleError> {
        self.read_uint(ITicketBooth::getSpentTotalCall {}.abi_encode(), "getSpentTotal")
            .await
    }

    pub async fn tickets_owned(&self) -> Result<U256, LifecycleError> {
        self.read_uint(ITicketBooth::getTicketsOwnedCall {}.abi_encode(), "getTicketsOwned")
            .await
    }

    async fn read_uint(&self, calldata: Vec<u8>, method: &str) -> Result<U256, LifecycleError> {
        let request = CallRequest {
            from: Some(self.account),
            to: self.contract,
            data: Bytes::from(calldata),
        };
        let output = self.provider.call(request).await?;
        U256::abi_decode(&output).map_err(|e| {
            LifecycleError::NetworkFailure(format!("Could not decode {} result: {}", method, e))
        })
    }

    /// Build the transaction request for an intent.
    pub fn transaction_request(&self, intent: &TransactionIntent) -> TransactionRequest {
        let quantity = U256::from(intent.quantity);
        let (calldata, value) = match intent.kind {
            TxKind::Purchase => (
                ITicketBooth::purchaseTicketsCall { quantity }.abi_encode(),
                Some(intent.attached_value),
            ),
            TxKind::Withdraw => (ITicketBooth::withdrawCall { quantity }.abi_encode(), None),
        };

        TransactionRequest {
            from: self.account,
            to: self.contract,
            data: Bytes::from(calldata),
            value,
        }
    }

    /// Hand the intent to the wallet. Resolves once the wallet has signed and
    /// broadcast it.
    pub async fn submit(&self, intent: &TransactionIntent) -> Result<PendingTransaction<P>, LifecycleError> {
        let request = self.transaction_request(intent);
        let hash = self.provider.send_transaction(request).await?;
        log::info!("[BINDING] {} broadcast as {}", intent.kind.name(), hash);
        Ok(PendingTransaction {
            provider: Rc::clone(&self.provider),
            hash,
        })
    }
}

/// A broadcast transaction that has not been observed in a block yet.
pub struct PendingTransaction<P> {
    provider: Rc<P>,
    hash: B256,
}

impl<P: WalletProvider> PendingTransaction<P> {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Wait for inclusion. A receipt with a failed status is an
    /// [`LifecycleError::ExecutionReverted`].
    pub async fn watch(self) -> Result<Receipt, LifecycleError> {
        let receipt = self.provider.wait_for_receipt(self.hash).await?;
        if !receipt.succeeded() {
            return Err(LifecycleError::ExecutionReverted(format!(
                "transaction {} failed on-chain",
                self.hash
            )));
        }
        Ok(receipt)
    }
}
