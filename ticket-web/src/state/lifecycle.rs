//! Lifecycle state management
//!
//! Mirrors the [`Lifecycle`] snapshot into a signal so components re-render on
//! every transition, and turns UI events into lifecycle operations.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;

use ticket_core::config::app_config;
use ticket_core::intent::{PendingInput, TxKind};
use ticket_core::session::LifecycleSnapshot;
use ticket_core::view::{self, Affordances};
use ticket_core::Lifecycle;

use crate::services::ethereum::InjectedProvider;

type PageLifecycle = Lifecycle<InjectedProvider>;

/// Global lifecycle context
#[derive(Clone, Copy)]
pub struct LifecycleContext {
    pub snapshot: RwSignal<LifecycleSnapshot>,
    pub input: RwSignal<PendingInput>,
    lifecycle: StoredValue<Rc<PageLifecycle>, LocalStorage>,
}

impl LifecycleContext {
    fn new(lifecycle: Rc<PageLifecycle>) -> Self {
        let snapshot = RwSignal::new(lifecycle.snapshot());
        lifecycle.subscribe(move |next| snapshot.set(next.clone()));

        Self {
            snapshot,
            input: RwSignal::new(PendingInput::default()),
            lifecycle: StoredValue::new_local(lifecycle),
        }
    }

    fn lifecycle(&self) -> Rc<PageLifecycle> {
        self.lifecycle.get_value()
    }

    /// Affordances for the current snapshot. Tracks the snapshot signal.
    pub fn affordances(&self) -> Affordances {
        let config = app_config();
        self.snapshot
            .with(|snapshot| view::render(snapshot, &config.display, config.value_decimals))
    }

    pub fn set_purchase_input(&self, value: String) {
        self.input.update(|input| input.tickets_to_purchase = value);
    }

    pub fn set_withdraw_input(&self, value: String) {
        self.input.update(|input| input.tickets_to_withdraw = value);
    }

    /// Silent restore plus the external account listener.
    fn start(&self) {
        let lifecycle = self.lifecycle();

        if let Some(provider) = lifecycle.provider() {
            let listener = Rc::clone(&lifecycle);
            provider.on_accounts_changed(move |accounts| {
                let lifecycle = Rc::clone(&listener);
                spawn_local(async move {
                    lifecycle.handle_accounts_changed(accounts).await;
                });
            });
        }

        spawn_local(async move {
            lifecycle.restore_session().await;
        });
    }

    pub fn connect(&self) {
        let lifecycle = self.lifecycle();
        spawn_local(async move {
            // Errors are already on the snapshot as a notice.
            let _ = lifecycle.request_connection().await;
        });
    }

    pub fn refresh(&self) {
        let lifecycle = self.lifecycle();
        spawn_local(async move {
            let _ = lifecycle.refresh().await;
        });
    }

    pub fn purchase(&self) {
        self.submit(TxKind::Purchase);
    }

    pub fn withdraw(&self) {
        self.submit(TxKind::Withdraw);
    }

    /// Submit one field and write back only that field, so edits to the
    /// other form made meanwhile survive.
    fn submit(&self, kind: TxKind) {
        let lifecycle = self.lifecycle();
        let input = self.input;
        let mut local = input.get_untracked();

        spawn_local(async move {
            // Errors are already on the snapshot as a notice.
            let _ = lifecycle.submit_input(kind, &mut local).await;
            input.update(|input| *input.field_mut(kind) = local.field(kind).to_string());
        });
    }
}

pub fn provide_lifecycle_context() -> LifecycleContext {
    let config = app_config().clone();
    let provider = InjectedProvider::detect(config.receipt_poll_ms);
    let context = LifecycleContext::new(Rc::new(Lifecycle::new(provider, config)));

    provide_context(context);
    context.start();
    context
}

pub fn use_lifecycle_context() -> LifecycleContext {
    expect_context::<LifecycleContext>()
}
