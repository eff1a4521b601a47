//! # Lifecycle Controller
//!
//! Owns the [`Session`] and the on-chain snapshot and is the only place they
//! change. Every public operation is a defined transition:
//!
//! | Operation                     | Transition                                       |
//! |-------------------------------|--------------------------------------------------|
//! | [`Lifecycle::new`]            | `NoProvider` or `Disconnected`                   |
//! | [`Lifecycle::restore_session`]| `Disconnected → Connected` (silent)              |
//! | [`Lifecycle::request_connection`] | `Disconnected → Connecting → Connected/Disconnected` |
//! | [`Lifecycle::handle_accounts_changed`] | any → `Disconnected` or `Connected` (new binding) |
//! | [`Lifecycle::refresh`]        | updates the on-chain snapshot only               |
//! | [`Lifecycle::purchase`] / [`Lifecycle::withdraw`] | updates pending/notice, then refreshes |
//! | [`Lifecycle::submit_input`]   | as above, clearing the input field on success    |
//!
//! ## Concurrency
//!
//! Everything runs on one thread. State lives in `RefCell`s that are never
//! borrowed across an `.await`. At most one submission is outstanding; a
//! second attempt fails with [`LifecycleError::SubmissionInFlight`].
//!
//! ## Observers
//!
//! Hosts mirror state into their own store through [`Lifecycle::subscribe`].
//! Observers run synchronously after each transition and must not call back
//! into the lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use alloy_primitives::{Address, B256};

use crate::config::AppConfig;
use crate::contract::ContractBinding;
use crate::error::LifecycleError;
use crate::intent::{PendingInput, TransactionIntent, TxKind};
use crate::provider::WalletProvider;
use crate::session::{
    LifecycleSnapshot, Notice, OnChainState, PendingSubmission, Session, SubmissionStage, ViewState,
};
use crate::view::{self, Affordances};

#[cfg(test)]
mod tests;

type Observer = Box<dyn Fn(&LifecycleSnapshot)>;

pub struct Lifecycle<P> {
    config: AppConfig,
    session: RefCell<Session<P>>,
    state: RefCell<LifecycleSnapshot>,
    observers: RefCell<Vec<Observer>>,
}

impl<P: WalletProvider> Lifecycle<P> {
    /// Start a page session with the result of provider detection.
    pub fn new(provider: Option<P>, config: AppConfig) -> Self {
        let session = Session::detect(provider, config.contract_address);
        let state = LifecycleSnapshot::initial(session.provider_present());
        Self {
            config,
            session: RefCell::new(session),
            state: RefCell::new(state),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&LifecycleSnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn snapshot(&self) -> LifecycleSnapshot {
        self.state.borrow().clone()
    }

    /// Affordances for the current state.
    pub fn affordances(&self) -> Affordances {
        view::render(&self.snapshot(), &self.config.display, self.config.value_decimals)
    }

    /// The detected wallet provider, for hosts that wire up its events.
    pub fn provider(&self) -> Option<Rc<P>> {
        self.session.borrow().provider()
    }

    /// Current binding, if a session is established.
    pub fn binding(&self) -> Option<ContractBinding<P>> {
        self.session.borrow().binding()
    }

    fn update(&self, f: impl FnOnce(&mut LifecycleSnapshot)) {
        f(&mut self.state.borrow_mut());
        let snapshot = self.snapshot();
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    /// Log an error, show it to the user and hand it back for `?`/return.
    fn report(&self, context: &str, err: LifecycleError) -> LifecycleError {
        err.log(context);
        self.update(|state| state.notice = Some(Notice::from(&err)));
        err
    }

    fn provider_or_absent(&self) -> Result<Rc<P>, LifecycleError> {
        self.session
            .borrow()
            .provider()
            .ok_or(LifecycleError::ProviderAbsent)
    }

    // ------------------------------------------------------------------
    // Account session
    // ------------------------------------------------------------------

    /// Silently pick up an account the wallet has already authorized.
    ///
    /// Never prompts; failures are logged and leave the page disconnected.
    pub async fn restore_session(&self) {
        let Ok(provider) = self.provider_or_absent() else {
            return;
        };

        match provider.current_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) if self.snapshot().view == ViewState::Disconnected => {
                    log::info!("[SESSION] Restored previously authorized account {}", account);
                    self.establish(account).await;
                }
                Some(_) => log::debug!("[SESSION] Skipping restore, session already changed"),
                None => log::info!("[SESSION] No previously authorized account"),
            },
            Err(err) => log::warn!("[SESSION] Could not read authorized accounts: {}", err),
        }
    }

    /// Ask the wallet for account access.
    ///
    /// Duplicate requests while one is outstanding, or once connected, are
    /// ignored.
    pub async fn request_connection(&self) -> Result<(), LifecycleError> {
        let provider = self
            .provider_or_absent()
            .map_err(|err| self.report("SESSION", err))?;

        let view = self.snapshot().view;
        if view != ViewState::Disconnected {
            log::debug!("[SESSION] Ignoring connect request in state {:?}", view);
            return Ok(());
        }

        self.update(|state| {
            state.view = ViewState::Connecting;
            state.notice = None;
        });

        let result = provider.request_accounts().await;

        // An account-change notification may have moved the session while
        // the prompt was open; that notification wins.
        if self.snapshot().view != ViewState::Connecting {
            log::debug!("[SESSION] Session changed while awaiting approval");
            return Ok(());
        }

        match result {
            Ok(accounts) => match accounts.first() {
                Some(&account) => {
                    log::info!("[SESSION] Account successfully connected: {}", account);
                    self.establish(account).await;
                    Ok(())
                }
                None => {
                    log::info!("[SESSION] No account detected");
                    self.update(|state| state.view = ViewState::Disconnected);
                    Err(self.report(
                        "SESSION",
                        LifecycleError::ConnectionRejected("wallet returned no accounts".to_string()),
                    ))
                }
            },
            Err(err) => {
                self.update(|state| state.view = ViewState::Disconnected);
                Err(self.report("SESSION", err))
            }
        }
    }

    /// Apply an external `accountsChanged` notification.
    ///
    /// The prior binding is always discarded. An empty list disconnects; a
    /// new first account establishes a fresh session and refreshes it.
    pub async fn handle_accounts_changed(&self, accounts: Vec<Address>) {
        if !self.session.borrow().provider_present() {
            return;
        }

        let next = accounts.first().copied();
        let current = self.session.borrow().account();
        if next.is_some() && next == current {
            log::debug!("[SESSION] Account notification for the active account, ignoring");
            return;
        }

        match next {
            Some(account) => {
                log::info!("[SESSION] Wallet switched to {}", account);
                self.establish(account).await;
            }
            None if current.is_none() && self.snapshot().view == ViewState::Disconnected => {
                log::debug!("[SESSION] Empty account notification while disconnected, ignoring");
            }
            None => {
                log::info!("[SESSION] Wallet disconnected all accounts");
                self.session.borrow_mut().set_account(None);
                self.update(|state| {
                    state.view = ViewState::Disconnected;
                    state.account = None;
                    state.on_chain = None;
                    state.refreshing = false;
                    state.notice = Some(Notice::info("Wallet disconnected"));
                });
            }
        }
    }

    /// Bind `account` and run the session-established refresh.
    async fn establish(&self, account: Address) {
        self.session.borrow_mut().set_account(Some(account));
        self.update(|state| {
            state.view = ViewState::Connected;
            state.account = Some(account);
            state.on_chain = None;
            state.refreshing = false;
        });
        // Failures are already reported to the user.
        let _ = self.refresh().await;
    }

    // ------------------------------------------------------------------
    // State reader
    // ------------------------------------------------------------------

    /// Re-read spent total and tickets owned and publish them together.
    ///
    /// On failure the previous snapshot stays in place. Results for a binding
    /// that has since been replaced are dropped.
    pub async fn refresh(&self) -> Result<(), LifecycleError> {
        let Some(binding) = self.binding() else {
            return Ok(());
        };

        self.update(|state| state.refreshing = true);
        let result = read_on_chain_state(&binding).await;

        if !self.session.borrow().is_current(&binding) {
            log::debug!(
                "[REFRESH] Dropping result for stale binding generation {}",
                binding.generation()
            );
            return Ok(());
        }

        match result {
            Ok(on_chain) => {
                log::info!(
                    "[REFRESH] spent_total={} tickets_owned={}",
                    on_chain.spent_total,
                    on_chain.tickets_owned
                );
                self.update(|state| {
                    state.on_chain = Some(on_chain);
                    state.refreshing = false;
                });
                Ok(())
            }
            Err(err) => {
                self.update(|state| state.refreshing = false);
                Err(self.report("REFRESH", err))
            }
        }
    }

    // ------------------------------------------------------------------
    // Transaction submitter
    // ------------------------------------------------------------------

    pub async fn purchase(&self, input: &str) -> Result<B256, LifecycleError> {
        self.submit(TxKind::Purchase, input).await
    }

    pub async fn withdraw(&self, input: &str) -> Result<B256, LifecycleError> {
        self.submit(TxKind::Withdraw, input).await
    }

    /// Submit the field of `input` matching `kind`. The field is cleared only
    /// once the transaction is confirmed; on any failure it keeps what the
    /// user typed.
    pub async fn submit_input(&self, kind: TxKind, input: &mut PendingInput) -> Result<B256, LifecycleError> {
        let raw = input.field(kind).to_string();
        let hash = self.submit(kind, &raw).await?;
        input.field_mut(kind).clear();
        Ok(hash)
    }

    async fn submit(&self, kind: TxKind, input: &str) -> Result<B256, LifecycleError> {
        if self.snapshot().pending.is_some() {
            return Err(self.report("SUBMIT", LifecycleError::SubmissionInFlight));
        }

        let binding = match self.binding() {
            Some(binding) => binding,
            None if !self.session.borrow().provider_present() => {
                return Err(self.report("SUBMIT", LifecycleError::ProviderAbsent));
            }
            None => {
                return Err(self.report(
                    "SUBMIT",
                    LifecycleError::ValidationFailed("Connect a wallet before submitting".to_string()),
                ));
            }
        };

        let intent = match kind {
            TxKind::Purchase => TransactionIntent::purchase(input, &self.config.pricing),
            TxKind::Withdraw => {
                let owned = self.snapshot().on_chain.map(|state| state.tickets_owned);
                TransactionIntent::withdraw(input, owned)
            }
        }
        .map_err(|err| self.report("SUBMIT", err))?;

        log::info!(
            "[SUBMIT] {} {} ticket(s), attaching {}",
            kind.name(),
            intent.quantity,
            intent.attached_value
        );
        self.update(|state| {
            state.pending = Some(PendingSubmission {
                kind,
                stage: SubmissionStage::AwaitingSignature,
            });
            state.notice = None;
        });

        let outcome = self.drive(&binding, &intent).await;
        self.update(|state| state.pending = None);

        match outcome {
            Ok(hash) => {
                log::info!("[SUBMIT] {} confirmed in {}", kind.name(), hash);
                self.update(|state| {
                    state.notice = Some(Notice::confirmed(kind, intent.quantity, hash));
                });
                // Refresh failures are reported but do not fail the submission.
                let _ = self.refresh().await;
                Ok(hash)
            }
            Err(err) => Err(self.report("SUBMIT", err)),
        }
    }

    /// Wallet confirmation then inclusion, checking after each wait that the
    /// binding still belongs to the active account.
    async fn drive(&self, binding: &ContractBinding<P>, intent: &TransactionIntent) -> Result<B256, LifecycleError> {
        let pending = binding.submit(intent).await?;
        self.ensure_current(binding)?;

        let hash = pending.hash();
        self.update(|state| {
            if let Some(pending) = state.pending.as_mut() {
                pending.stage = SubmissionStage::AwaitingInclusion;
            }
        });

        pending.watch().await?;
        self.ensure_current(binding)?;
        Ok(hash)
    }

    fn ensure_current(&self, binding: &ContractBinding<P>) -> Result<(), LifecycleError> {
        if self.session.borrow().is_current(binding) {
            Ok(())
        } else {
            Err(LifecycleError::SessionChanged)
        }
    }
}

/// Both reads must succeed for either value to be published.
async fn read_on_chain_state<P: WalletProvider>(
    binding: &ContractBinding<P>,
) -> Result<OnChainState, LifecycleError> {
    let spent_total = binding.spent_total().await?;
    let tickets_owned = binding.tickets_owned().await?;
    Ok(OnChainState {
        spent_total,
        tickets_owned,
    })
}
