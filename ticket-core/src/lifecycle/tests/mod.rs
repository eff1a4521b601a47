//! # Lifecycle Tests
//!
//! Shared fixtures: an in-memory wallet that also plays the contract, and
//! helpers to build a lifecycle around it.


use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256, U64};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;

use super::Lifecycle;
use crate::config::AppConfig;
use crate::contract::ITicketBooth;
use crate::error::LifecycleError;
use crate::intent::{PendingInput, TxKind};
use crate::provider::{CallRequest, Receipt, RpcFailure, TransactionRequest, WalletProvider};
use crate::session::{OnChainState, ViewState};

/// Wallet + contract double. Cloning shares the same state.
#[derive(Clone, Default)]
pub(super) struct MockProvider(Rc<MockChain>);

impl Deref for MockProvider {
    type Target = MockChain;

    fn deref(&self) -> &MockChain {
        &self.0
    }
}

#[derive(Default)]
pub(super) struct MockChain {
    /// Returned by `current_accounts`.
    pub authorized: RefCell<Vec<Address>>,
    /// Returned by `request_accounts`; `None` means approve `authorized`.
    pub request_result: RefCell<Option<Result<Vec<Address>, LifecycleError>>>,
    pub balances: RefCell<HashMap<Address, OnChainState>>,
    pub request_calls: Cell<usize>,
    pub read_calls: Cell<usize>,
    pub sent: RefCell<Vec<TransactionRequest>>,
    /// Selector of the read that should fail next.
    pub fail_read: Cell<Option<[u8; 4]>>,
    /// Answer every read with empty bytes, like a call to an address without code.
    pub empty_reads: Cell<bool>,
    pub send_error: RefCell<Option<LifecycleError>>,
    pub revert_on_inclusion: Cell<bool>,
    /// Failure returned by the next inclusion wait.
    pub fail_receipt: RefCell<Option<LifecycleError>>,
    /// Suspend once inside `request_accounts`, like an open approval prompt.
    pub yield_on_request: Cell<bool>,
    /// Suspend once inside `send_transaction` so a test can interleave work.
    pub yield_on_send: Cell<bool>,
    /// Suspend once inside every `call`.
    pub yield_on_read: Cell<bool>,
    receipts: RefCell<HashMap<B256, Receipt>>,
}

impl MockChain {
    pub fn set_balance(&self, account: Address, tickets: u64, spent: u64) {
        self.balances.borrow_mut().insert(
            account,
            OnChainState {
                spent_total: U256::from(spent),
                tickets_owned: U256::from(tickets),
            },
        );
    }

    pub fn balance(&self, account: Address) -> OnChainState {
        self.balances.borrow().get(&account).copied().unwrap_or_default()
    }

    pub fn send_calls(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Apply a transaction the way the contract would. Returns `false` if the
    /// contract reverts.
    fn execute(&self, request: &TransactionRequest) -> bool {
        let mut balances = self.balances.borrow_mut();
        let state = balances.entry(request.from).or_default();
        let selector: [u8; 4] = request.data[..4].try_into().unwrap();

        if selector == ITicketBooth::purchaseTicketsCall::SELECTOR {
            let call = ITicketBooth::purchaseTicketsCall::abi_decode(&request.data).unwrap();
            state.tickets_owned += call.quantity;
            state.spent_total += request.value.unwrap_or_default();
            true
        } else if selector == ITicketBooth::withdrawCall::SELECTOR {
            let call = ITicketBooth::withdrawCall::abi_decode(&request.data).unwrap();
            if call.quantity > state.tickets_owned {
                return false;
            }
            state.tickets_owned -= call.quantity;
            true
        } else {
            false
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, LifecycleError> {
        self.request_calls.set(self.request_calls.get() + 1);
        if self.yield_on_request.get() {
            tokio::task::yield_now().await;
        }
        match self.request_result.borrow_mut().take() {
            Some(result) => {
                if let Ok(accounts) = &result {
                    *self.authorized.borrow_mut() = accounts.clone();
                }
                result
            }
            None => Ok(self.authorized.borrow().clone()),
        }
    }

    async fn current_accounts(&self) -> Result<Vec<Address>, LifecycleError> {
        Ok(self.authorized.borrow().clone())
    }

    async fn call(&self, request: CallRequest) -> Result<Bytes, LifecycleError> {
        self.read_calls.set(self.read_calls.get() + 1);
        if self.yield_on_read.get() {
            tokio::task::yield_now().await;
        }
        let selector: [u8; 4] = request.data[..4].try_into().unwrap();

        if self.fail_read.get() == Some(selector) {
            self.fail_read.set(None);
            return Err(RpcFailure::new(Some(-32603), "Failed to fetch").into_read_error());
        }
        if self.empty_reads.get() {
            return Ok(Bytes::new());
        }

        let state = self.balance(request.from.unwrap_or_default());
        let value = if selector == ITicketBooth::getSpentTotalCall::SELECTOR {
            state.spent_total
        } else if selector == ITicketBooth::getTicketsOwnedCall::SELECTOR {
            state.tickets_owned
        } else {
            return Err(LifecycleError::ExecutionReverted("unknown selector".to_string()));
        };
        Ok(Bytes::from(value.abi_encode()))
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, LifecycleError> {
        if self.yield_on_send.get() {
            tokio::task::yield_now().await;
        }
        if let Some(err) = self.send_error.borrow_mut().take() {
            return Err(err);
        }

        let nonce = self.sent.borrow().len() as u64;
        let hash = keccak256(nonce.to_be_bytes());

        let succeeded = !self.revert_on_inclusion.get() && self.execute(&request);
        self.sent.borrow_mut().push(request);
        self.receipts.borrow_mut().insert(
            hash,
            Receipt {
                transaction_hash: hash,
                block_number: Some(U64::from(nonce + 1)),
                status: Some(U64::from(succeeded as u64)),
            },
        );
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<Receipt, LifecycleError> {
        if let Some(err) = self.fail_receipt.borrow_mut().take() {
            return Err(err);
        }
        self.receipts
            .borrow()
            .get(&hash)
            .cloned()
            .ok_or_else(|| LifecycleError::NetworkFailure("unknown transaction".to_string()))
    }
}

pub(super) fn account(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub(super) fn lifecycle(mock: &MockProvider) -> Lifecycle<MockProvider> {
    Lifecycle::new(Some(mock.clone()), AppConfig::default())
}

/// Lifecycle already connected as `account(1)` with the given balance.
pub(super) async fn connected(mock: &MockProvider, tickets: u64, spent: u64) -> Lifecycle<MockProvider> {
    mock.authorized.replace(vec![account(1)]);
    mock.set_balance(account(1), tickets, spent);
    let lifecycle = lifecycle(mock);
    lifecycle.request_connection().await.expect("connection should succeed in test");
    lifecycle
}

/// Record every distinct view state the lifecycle passes through.
pub(super) fn record_views(lifecycle: &Lifecycle<MockProvider>) -> Rc<RefCell<Vec<ViewState>>> {
    let views = Rc::new(RefCell::new(vec![lifecycle.snapshot().view]));
    let sink = Rc::clone(&views);
    lifecycle.subscribe(move |snapshot| {
        let mut views = sink.borrow_mut();
        if views.last() != Some(&snapshot.view) {
            views.push(snapshot.view);
        }
    });
    views
}
