//! Account panel: balances plus the purchase and withdraw forms

use leptos::prelude::*;

use ticket_core::view::ActionPanel;

use crate::state::lifecycle::use_lifecycle_context;

#[component]
pub fn ActionPanelView(panel: ActionPanel) -> impl IntoView {
    let ctx = use_lifecycle_context();
    let disabled = !panel.controls_enabled;

    let spent = panel.spent_total.unwrap_or_else(|| "…".to_string());
    let owned = panel.tickets_owned.unwrap_or_else(|| "…".to_string());

    view! {
        <section class="card action-panel">
            <p class="account">
                "Your Account: "
                <span class="account-address" title=panel.account>{panel.account_short}</span>
            </p>

            <div class="balances" class:refreshing=panel.refreshing>
                <p>{panel.spent_label}": "<strong>{spent}</strong></p>
                <p>{panel.owned_label}": "<strong>{owned}</strong></p>
            </div>

            <form
                class="ticket-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    ctx.purchase();
                }
            >
                <input
                    type="number"
                    min="1"
                    step="1"
                    placeholder="Tickets to purchase"
                    prop:value=move || ctx.input.with(|input| input.tickets_to_purchase.clone())
                    on:input=move |ev| ctx.set_purchase_input(event_target_value(&ev))
                    disabled=disabled
                />
                <button type="submit" class="btn" disabled=disabled>
                    {panel.purchase_button}
                </button>
            </form>

            <form
                class="ticket-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    ctx.withdraw();
                }
            >
                <input
                    type="number"
                    min="1"
                    step="1"
                    placeholder="Tickets to withdraw"
                    prop:value=move || ctx.input.with(|input| input.tickets_to_withdraw.clone())
                    on:input=move |ev| ctx.set_withdraw_input(event_target_value(&ev))
                    disabled=disabled
                />
                <button type="submit" class="btn" disabled=disabled>
                    {panel.withdraw_button}
                </button>
            </form>

            <button class="btn btn-secondary" on:click=move |_| ctx.refresh() disabled=panel.refreshing>
                "Refresh"
            </button>
        </section>
    }
}
