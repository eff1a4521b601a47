//! Session and snapshot data model.
//!
//! [`Session`] holds the detected provider, the active account and the
//! binding derived from them. Its only mutator is [`Session::set_account`], which
//! keeps the invariant `binding.is_some() == account.is_some()` and rebuilds
//! the binding on every account change.
//!
//! [`LifecycleSnapshot`] is the plain-data view of everything the UI renders.

use std::rc::Rc;

use alloy_primitives::{Address, B256, U256};

use crate::contract::ContractBinding;
use crate::error::{ErrorKind, LifecycleError};
use crate::intent::TxKind;
use crate::provider::WalletProvider;

pub struct Session<P> {
    provider: Option<Rc<P>>,
    contract: Address,
    account: Option<Address>,
    binding: Option<ContractBinding<P>>,
    generation: u64,
}

impl<P: WalletProvider> Session<P> {
    /// Record the provider detection result. Absence is final for the page.
    pub fn detect(provider: Option<P>, contract: Address) -> Self {
        match provider {
            Some(_) => log::info!("[SESSION] Wallet provider detected"),
            None => log::warn!("[SESSION] No wallet provider detected"),
        }
        Self {
            provider: provider.map(Rc::new),
            contract,
            account: None,
            binding: None,
            generation: 0,
        }
    }

    pub fn provider_present(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<Rc<P>> {
        self.provider.clone()
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn binding(&self) -> Option<ContractBinding<P>> {
        self.binding.clone()
    }

    pub fn is_current(&self, binding: &ContractBinding<P>) -> bool {
        binding.generation() == self.generation && Some(binding.account()) == self.account
    }

    /// Replace the active account and rebuild the binding for it.
    pub fn set_account(&mut self, account: Option<Address>) {
        self.generation += 1;
        self.account = account;
        self.binding = match (&self.provider, account) {
            (Some(provider), Some(account)) => Some(ContractBinding::new(
                Rc::clone(provider),
                self.contract,
                account,
                self.generation,
            )),
            _ => None,
        };
        match account {
            Some(account) => log::info!("[SESSION] Active account set to {}", account),
            None => log::info!("[SESSION] Active account cleared"),
        }
    }
}

/// Node of the view state machine. None of the states is terminal except
/// `NoProvider`, which has no transitions out for the page's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    NoProvider,
    Disconnected,
    Connecting,
    Connected,
}

/// Read-only snapshot of the contract's per-account values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OnChainState {
    pub spent_total: U256,
    pub tickets_owned: U256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionStage {
    AwaitingSignature,
    AwaitingInclusion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    pub kind: TxKind,
    pub stage: SubmissionStage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Latest user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub error_kind: Option<ErrorKind>,
    /// Repeating the same action may succeed.
    pub retryable: bool,
    pub tx_hash: Option<B256>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            error_kind: None,
            retryable: false,
            tx_hash: None,
        }
    }

    pub fn confirmed(kind: TxKind, quantity: u64, tx_hash: B256) -> Self {
        let verb = match kind {
            TxKind::Purchase => "Purchased",
            TxKind::Withdraw => "Withdrew",
        };
        Self {
            level: NoticeLevel::Success,
            message: format!("{} {} ticket(s)", verb, quantity),
            error_kind: None,
            retryable: false,
            tx_hash: Some(tx_hash),
        }
    }
}

impl From<&LifecycleError> for Notice {
    fn from(err: &LifecycleError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: err.user_message(),
            error_kind: Some(err.kind()),
            retryable: err.is_retryable(),
            tx_hash: None,
        }
    }
}

/// Everything the presentation layer needs, as plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleSnapshot {
    pub view: ViewState,
    pub account: Option<Address>,
    /// `None` until the first successful refresh of the current session.
    pub on_chain: Option<OnChainState>,
    pub refreshing: bool,
    pub pending: Option<PendingSubmission>,
    pub notice: Option<Notice>,
}

impl LifecycleSnapshot {
    pub fn initial(provider_present: bool) -> Self {
        Self {
            view: if provider_present {
                ViewState::Disconnected
            } else {
                ViewState::NoProvider
            },
            account: None,
            on_chain: None,
            refreshing: false,
            pending: None,
            notice: None,
        }
    }
}
