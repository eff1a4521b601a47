//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use ticket_core::config::app_config;
use ticket_core::units::truncate_address;

use crate::state::lifecycle::use_lifecycle_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_lifecycle_context();
    let title = app_config().display.title.clone();

    // Short account chip once a session is established
    let account = move || {
        ctx.snapshot.with(|snapshot| {
            snapshot.account.map(|account| {
                let full = account.to_string();
                let short = truncate_address(&full);
                view! { <span class="nav-account" title=full>{short}</span> }
            })
        })
    };

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">{title}</span>
                </A>
                {account}
            </div>
        </nav>
    }
}
